//! Transition strategies for switching between the outgoing and incoming view.

use std::fmt;
use std::rc::Rc;

use crate::view::ViewRef;

/// Switches visibility from an outgoing view to an incoming view.
///
/// Either side may be absent at the edges of the stack. An implementation must
/// call [`Completion::complete`] exactly once, either before returning or at
/// any later point. Until it does, the stack refuses further navigation.
///
/// Any `Fn(Option<ViewRef>, Option<ViewRef>, Completion)` closure is a transition.
pub trait Transition {
    fn run(&self, from: Option<ViewRef>, to: Option<ViewRef>, done: Completion);
}

impl<F> Transition for F
where
    F: Fn(Option<ViewRef>, Option<ViewRef>, Completion),
{
    fn run(&self, from: Option<ViewRef>, to: Option<ViewRef>, done: Completion) {
        self(from, to, done)
    }
}

/// Hides the outgoing view, shows the incoming one and completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct Instant;

impl Transition for Instant {
    fn run(&self, from: Option<ViewRef>, to: Option<ViewRef>, done: Completion) {
        if let Some(from) = from {
            from.set_active(false);
        }
        if let Some(to) = to {
            to.set_active(true);
        }
        done.complete();
    }
}

/// One-shot completion signal handed to a [`Transition`].
///
/// Consuming `self` in [`complete`](Self::complete) makes a second signal
/// impossible. Dropping an unsignalled completion leaves the owning stack in
/// flight for good.
pub struct Completion {
    callback: Option<Box<dyn FnOnce()>>,
}

impl Completion {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Signal that the transition has finished.
    pub fn complete(mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.callback.is_some() {
            tracing::warn!("Transition completion dropped without being signalled; navigation stays blocked");
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// Pick the first transition that is present, falling back to [`Instant`].
pub fn resolve(
    explicit: Option<Rc<dyn Transition>>,
    stack_default: Option<Rc<dyn Transition>>,
) -> Rc<dyn Transition> {
    [explicit, stack_default]
        .into_iter()
        .flatten()
        .next()
        .unwrap_or_else(|| Rc::new(Instant))
}
