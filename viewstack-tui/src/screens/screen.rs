//! The behaviour attached to the root of every screen view.

use viewstack_core::{Component, TransitionCompleteHandler, ViewBehaviour};

/// A link from one screen to another view id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub target: String,
}

impl Link {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// Arguments handed to a screen when it is pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenArgs {
    /// Id of the view the user navigated from.
    pub from: Option<String>,
}

/// Title, body and outgoing links of a screen, plus its selection state.
#[derive(Debug, Clone)]
pub struct Screen {
    title: String,
    body: String,
    links: Vec<Link>,
    selected: usize,
    visits: u32,
    from: Option<String>,
}

impl Screen {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            links: Vec::new(),
            selected: 0,
            visits: 0,
            from: None,
        }
    }

    pub fn link(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.links.push(Link::new(label, target));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// How many times a transition onto this screen has completed.
    ///
    /// Each completed transition also moves the highlight back to the first link.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// The view this screen was opened from, if it was pushed with args.
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Target of the highlighted link.
    pub fn selected_target(&self) -> Option<&str> {
        self.links
            .get(self.selected)
            .map(|link| link.target.as_str())
    }

    /// Move the highlight by `delta`, wrapping at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        if self.links.is_empty() {
            return;
        }
        let len = self.links.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}

impl Component for Screen {
    fn as_transition_complete(&mut self) -> Option<&mut dyn TransitionCompleteHandler> {
        Some(self)
    }
}

impl TransitionCompleteHandler for Screen {
    fn handle_transition_complete(&mut self) {
        self.visits += 1;
        self.selected = 0;
    }
}

impl ViewBehaviour<ScreenArgs> for Screen {
    fn init(&mut self, args: ScreenArgs) {
        self.from = args.from;
    }
}
