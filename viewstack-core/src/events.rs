//! Observer lists for navigation events.
//!
//! Each event has its own list of listeners. Firing walks a snapshot of the
//! list, so a listener may subscribe or unsubscribe while being called.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::view::ViewRef;

/// Listener for events about a single view: `(id, view)`.
pub type ViewListener = dyn Fn(&str, &ViewRef);

/// Listener for transition events: `(from_id, to_id)`.
pub type TransitionListener = dyn Fn(Option<&str>, Option<&str>);

/// Handle returned by every subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listeners<F: ?Sized> {
    entries: RefCell<Vec<(ListenerId, Rc<F>)>>,
}

impl<F: ?Sized> Default for Listeners<F> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<F: ?Sized> Listeners<F> {
    fn add(&self, id: ListenerId, listener: Rc<F>) {
        self.entries.borrow_mut().push((id, listener));
    }

    fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(held, _)| *held != id);
        entries.len() != before
    }

    fn snapshot(&self) -> Vec<Rc<F>> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// The events a [`crate::ViewStack`] produces.
#[derive(Default)]
pub struct StackEvents {
    next_id: Cell<u64>,
    view_created: Listeners<ViewListener>,
    view_destroyed: Listeners<ViewListener>,
    view_shown: Listeners<ViewListener>,
    view_hidden: Listeners<ViewListener>,
    transition_started: Listeners<TransitionListener>,
    transition_complete: Listeners<TransitionListener>,
}

impl StackEvents {
    fn next_id(&self) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ListenerId(id)
    }

    /// A view was instantiated and is about to be pushed.
    pub fn on_view_created(&self, listener: impl Fn(&str, &ViewRef) + 'static) -> ListenerId {
        let id = self.next_id();
        self.view_created.add(id, Rc::new(listener));
        id
    }

    /// A popped view was handed back to the factory.
    pub fn on_view_destroyed(&self, listener: impl Fn(&str, &ViewRef) + 'static) -> ListenerId {
        let id = self.next_id();
        self.view_destroyed.add(id, Rc::new(listener));
        id
    }

    /// A view became the top of the stack after a transition.
    pub fn on_view_shown(&self, listener: impl Fn(&str, &ViewRef) + 'static) -> ListenerId {
        let id = self.next_id();
        self.view_shown.add(id, Rc::new(listener));
        id
    }

    /// A view stopped being the top of the stack after a transition.
    pub fn on_view_hidden(&self, listener: impl Fn(&str, &ViewRef) + 'static) -> ListenerId {
        let id = self.next_id();
        self.view_hidden.add(id, Rc::new(listener));
        id
    }

    /// A transition away from a view is starting.
    pub fn on_transition_started(
        &self,
        listener: impl Fn(Option<&str>, Option<&str>) + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.transition_started.add(id, Rc::new(listener));
        id
    }

    /// A transition signalled completion.
    pub fn on_transition_complete(
        &self,
        listener: impl Fn(Option<&str>, Option<&str>) + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.transition_complete.add(id, Rc::new(listener));
        id
    }

    /// Remove a listener from whichever event it was subscribed to.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.view_created.remove(id)
            || self.view_destroyed.remove(id)
            || self.view_shown.remove(id)
            || self.view_hidden.remove(id)
            || self.transition_started.remove(id)
            || self.transition_complete.remove(id)
    }

    /// Total number of subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.view_created.len()
            + self.view_destroyed.len()
            + self.view_shown.len()
            + self.view_hidden.len()
            + self.transition_started.len()
            + self.transition_complete.len()
    }

    pub(crate) fn emit_view_created(&self, id: &str, view: &ViewRef) {
        fire_view(&self.view_created, id, view);
    }

    pub(crate) fn emit_view_destroyed(&self, id: &str, view: &ViewRef) {
        fire_view(&self.view_destroyed, id, view);
    }

    pub(crate) fn emit_view_shown(&self, id: &str, view: &ViewRef) {
        fire_view(&self.view_shown, id, view);
    }

    pub(crate) fn emit_view_hidden(&self, id: &str, view: &ViewRef) {
        fire_view(&self.view_hidden, id, view);
    }

    pub(crate) fn emit_transition_started(&self, from: Option<&str>, to: Option<&str>) {
        fire_transition(&self.transition_started, from, to);
    }

    pub(crate) fn emit_transition_complete(&self, from: Option<&str>, to: Option<&str>) {
        fire_transition(&self.transition_complete, from, to);
    }
}

fn fire_view(listeners: &Listeners<ViewListener>, id: &str, view: &ViewRef) {
    for listener in listeners.snapshot() {
        listener(id, view);
    }
}

fn fire_transition(listeners: &Listeners<TransitionListener>, from: Option<&str>, to: Option<&str>) {
    for listener in listeners.snapshot() {
        listener(from, to);
    }
}

impl fmt::Debug for StackEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
