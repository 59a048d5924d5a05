//! Footer shown under every screen.

use viewstack_core::{Component, TransitionCompleteHandler, TransitionStartedHandler};

/// Key hint line that dims while its view is being transitioned away from.
#[derive(Debug, Clone)]
pub struct Footer {
    hint: String,
    leaving: bool,
}

impl Footer {
    pub fn new(hint: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            leaving: false,
        }
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// True between transition-started and the next transition-complete.
    pub fn is_leaving(&self) -> bool {
        self.leaving
    }
}

impl Component for Footer {
    fn as_transition_started(&mut self) -> Option<&mut dyn TransitionStartedHandler> {
        Some(self)
    }

    fn as_transition_complete(&mut self) -> Option<&mut dyn TransitionCompleteHandler> {
        Some(self)
    }
}

impl TransitionStartedHandler for Footer {
    fn handle_transition_started(&mut self) {
        self.leaving = true;
    }
}

impl TransitionCompleteHandler for Footer {
    fn handle_transition_complete(&mut self) {
        self.leaving = false;
    }
}
