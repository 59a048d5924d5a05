//! The navigation stack.
//!
//! [`ViewStack`] keeps an ordered list of live views and only ever appends to
//! or removes from its tail. Every push and pop runs the same transition
//! protocol:
//!
//! 1. resolve the transition (explicit, then stack default, then [`Instant`](crate::Instant));
//! 2. capture the current top as the outgoing entry;
//! 3. mutate the stack; the new top is the incoming entry;
//! 4. notify the outgoing view that the transition started;
//! 5. run the transition;
//! 6. on completion notify the incoming view, fire transition-complete,
//!    view-hidden and view-shown, clear the in-flight flag and finally destroy
//!    whatever was popped.
//!
//! Only one transition may be in flight. The stack counts as in flight from
//! the moment a request is accepted, so view creation, init hooks, listeners
//! and handlers all run inside the flight. Requests that arrive meanwhile are
//! dropped and reported as [`Navigation::Dropped`]. A transition that never
//! completes blocks the stack for good; there is no timeout.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::StackConfig;
use crate::error::{NavigationError, Result};
use crate::events::StackEvents;
use crate::factory::ViewFactory;
use crate::lifecycle;
use crate::transition::{self, Completion, Transition};
use crate::view::{NotifyScope, ViewRef};

/// Initialization hook run on a freshly created view before it is pushed.
pub type InitFn<'a> = Box<dyn FnOnce(&ViewRef) -> Result<()> + 'a>;

/// A view resident in the stack.
#[derive(Debug, Clone)]
struct ViewEntry {
    id: String,
    view: ViewRef,
}

impl ViewEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Outcome of a navigation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The stack changed and a transition was started.
    Accepted,
    /// Another transition was in flight, so nothing happened.
    Dropped,
}

impl Navigation {
    pub fn is_accepted(self) -> bool {
        self == Navigation::Accepted
    }
}

/// A navigation request in data form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    Push(String),
    Pop,
}

enum StackChange {
    Push(ViewEntry),
    Pop,
}

#[derive(Default)]
struct StackState {
    entries: Vec<ViewEntry>,
    factory: Option<Rc<dyn ViewFactory>>,
    default_transition: Option<Rc<dyn Transition>>,
    notify_scope: NotifyScope,
    in_flight: bool,
}

#[derive(Default)]
struct Shared {
    state: RefCell<StackState>,
    events: StackEvents,
}

/// Stack-based view navigation with pluggable transitions.
///
/// Cloning yields another handle to the same stack, so listeners and
/// transitions can hold on to it. No internal borrow is held while factory,
/// listener, handler or transition code runs.
#[derive(Clone, Default)]
pub struct ViewStack {
    shared: Rc<Shared>,
}

impl ViewStack {
    /// Creates a stack that is not yet bound to a factory.
    ///
    /// Navigation fails with [`NavigationError::Uninitialized`] until
    /// [`init`](Self::init) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack bound to `factory`.
    pub fn with_factory(factory: Rc<dyn ViewFactory>) -> Self {
        let stack = Self::new();
        stack.init(factory);
        stack
    }

    /// Creates a stack bound to `factory` and configured from `config`.
    pub fn with_config(factory: Rc<dyn ViewFactory>, config: &StackConfig) -> Self {
        let stack = Self::with_factory(factory);
        stack.set_notify_scope(config.notify_scope);
        stack
    }

    /// Binds the view factory. Binding again replaces the previous factory.
    pub fn init(&self, factory: Rc<dyn ViewFactory>) {
        self.shared.state.borrow_mut().factory = Some(factory);
        tracing::debug!("View stack initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.state.borrow().factory.is_some()
    }

    /// The event listeners of this stack.
    pub fn events(&self) -> &StackEvents {
        &self.shared.events
    }

    /// Transition used when a request does not name one.
    pub fn set_default_transition(&self, transition: Option<Rc<dyn Transition>>) {
        self.shared.state.borrow_mut().default_transition = transition;
    }

    pub fn set_notify_scope(&self, scope: NotifyScope) {
        self.shared.state.borrow_mut().notify_scope = scope;
    }

    pub fn notify_scope(&self) -> NotifyScope {
        self.shared.state.borrow().notify_scope
    }

    /// Id of the top view, if any.
    pub fn top_view_id(&self) -> Option<String> {
        self.shared
            .state
            .borrow()
            .entries
            .last()
            .map(|entry| entry.id.clone())
    }

    pub fn top_view(&self) -> Option<ViewRef> {
        self.shared
            .state
            .borrow()
            .entries
            .last()
            .map(|entry| entry.view.clone())
    }

    pub fn len(&self) -> usize {
        self.shared.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().entries.is_empty()
    }

    /// Ids from bottom to top.
    pub fn view_ids(&self) -> Vec<String> {
        self.shared
            .state
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.id.clone())
            .collect()
    }

    pub fn is_transition_in_progress(&self) -> bool {
        self.shared.state.borrow().in_flight
    }

    /// Push the view registered under `id` using the default transition.
    pub fn push(&self, id: &str) -> Result<Navigation> {
        self.push_with(id, None, None)
    }

    /// Push the view registered under `id`.
    ///
    /// `init` runs on the new view before any event fires. If creation or
    /// `init` fails the error is returned, the stack is left untouched and a
    /// created instance is handed back to the factory. The stack already
    /// counts as in flight while `init` runs.
    pub fn push_with(
        &self,
        id: &str,
        init: Option<InitFn<'_>>,
        transition: Option<Rc<dyn Transition>>,
    ) -> Result<Navigation> {
        let Some(factory) = self.begin("push")? else {
            return Ok(Navigation::Dropped);
        };

        let view = match factory.create(id) {
            Ok(view) => view,
            Err(err) => {
                self.abandon();
                return Err(err.into());
            }
        };
        if let Some(init) = init
            && let Err(err) = init(&view)
        {
            tracing::debug!(id, error = %err, "View initialization failed");
            factory.destroy(id, view);
            self.abandon();
            return Err(err);
        }

        tracing::debug!(id, "Pushing view");
        self.shared.events.emit_view_created(id, &view);
        self.perform_transition(
            transition,
            StackChange::Push(ViewEntry {
                id: id.to_string(),
                view,
            }),
        );
        Ok(Navigation::Accepted)
    }

    /// Pop the top view using the default transition.
    pub fn pop(&self) -> Result<Navigation> {
        self.pop_with(None)
    }

    /// Pop the top view.
    ///
    /// The popped view is destroyed only once the transition completes.
    /// Popping an empty stack runs a transition with no views on either side
    /// and destroys nothing.
    pub fn pop_with(&self, transition: Option<Rc<dyn Transition>>) -> Result<Navigation> {
        if self.begin("pop")?.is_none() {
            return Ok(Navigation::Dropped);
        }

        tracing::debug!(top = ?self.top_view_id(), "Popping view");
        self.perform_transition(transition, StackChange::Pop);
        Ok(Navigation::Accepted)
    }

    /// Run a navigation request given in data form.
    pub fn navigate(
        &self,
        action: NavigationAction,
        transition: Option<Rc<dyn Transition>>,
    ) -> Result<Navigation> {
        match action {
            NavigationAction::Push(id) => self.push_with(&id, None, transition),
            NavigationAction::Pop => self.pop_with(transition),
        }
    }

    /// Check the guards shared by push and pop and claim the flight.
    ///
    /// Returns the factory when the request may proceed and `None` when it
    /// must be dropped because a transition is in flight. An accepted request
    /// either runs a transition or calls [`abandon`](Self::abandon).
    fn begin(&self, action: &str) -> Result<Option<Rc<dyn ViewFactory>>> {
        let mut state = self.shared.state.borrow_mut();
        let factory = state.factory.clone().ok_or(NavigationError::Uninitialized)?;
        if state.in_flight {
            tracing::warn!(action, "Transition in progress; dropping navigation request");
            return Ok(None);
        }
        state.in_flight = true;
        Ok(Some(factory))
    }

    /// Give up a claimed flight before any transition started.
    fn abandon(&self) {
        self.shared.state.borrow_mut().in_flight = false;
    }

    fn perform_transition(&self, requested: Option<Rc<dyn Transition>>, change: StackChange) {
        let (transition, outgoing, incoming, removed, scope) = {
            let mut state = self.shared.state.borrow_mut();
            let transition = transition::resolve(requested, state.default_transition.clone());
            let outgoing = state.entries.last().cloned();
            let removed = match change {
                StackChange::Push(entry) => {
                    state.entries.push(entry);
                    None
                }
                StackChange::Pop => state.entries.pop(),
            };
            let incoming = state.entries.last().cloned();
            (transition, outgoing, incoming, removed, state.notify_scope)
        };

        if let Some(outgoing) = &outgoing {
            lifecycle::notify_transition_started(&outgoing.view, scope);
            self.shared
                .events
                .emit_transition_started(Some(&outgoing.id), incoming.as_ref().map(|e| e.id()));
        }

        let from = outgoing.as_ref().map(|entry| entry.view.clone());
        let to = incoming.as_ref().map(|entry| entry.view.clone());
        let shared = Rc::downgrade(&self.shared);
        let done = Completion::new(move || {
            let Some(shared) = shared.upgrade() else {
                tracing::debug!("Transition completed after its stack was dropped");
                return;
            };
            ViewStack { shared }.finish_transition(outgoing, incoming, removed, scope);
        });

        transition.run(from, to, done);
    }

    fn finish_transition(
        &self,
        outgoing: Option<ViewEntry>,
        incoming: Option<ViewEntry>,
        removed: Option<ViewEntry>,
        scope: NotifyScope,
    ) {
        if let Some(incoming) = &incoming {
            lifecycle::notify_transition_complete(&incoming.view, scope);
        }

        let events = &self.shared.events;
        let from_id = outgoing.as_ref().map(|entry| entry.id());
        let to_id = incoming.as_ref().map(|entry| entry.id());
        events.emit_transition_complete(from_id, to_id);
        if let Some(outgoing) = &outgoing {
            events.emit_view_hidden(&outgoing.id, &outgoing.view);
        }
        if let Some(incoming) = &incoming {
            events.emit_view_shown(&incoming.id, &incoming.view);
        }

        self.shared.state.borrow_mut().in_flight = false;
        tracing::debug!(from = ?from_id, to = ?to_id, "Transition complete");

        if let Some(removed) = removed {
            self.destroy_entry(removed);
        }
    }

    fn destroy_entry(&self, entry: ViewEntry) {
        self.shared
            .events
            .emit_view_destroyed(&entry.id, &entry.view);
        let factory = self.shared.state.borrow().factory.clone();
        if let Some(factory) = factory {
            factory.destroy(&entry.id, entry.view);
        }
    }
}

impl fmt::Debug for ViewStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("ViewStack")
            .field(
                "entries",
                &state.entries.iter().map(ViewEntry::id).collect::<Vec<_>>(),
            )
            .field("initialized", &state.factory.is_some())
            .field("in_flight", &state.in_flight)
            .field("notify_scope", &state.notify_scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::factory::ViewCatalog;
    use crate::view::ViewNode;

    fn catalog() -> Rc<ViewCatalog> {
        Rc::new(
            ViewCatalog::new()
                .view("home", |name| ViewNode::builder(name).build())
                .view("settings", |name| ViewNode::builder(name).build()),
        )
    }

    /// A transition that parks its completion until released.
    #[derive(Default)]
    struct Held {
        pending: RefCell<Option<Completion>>,
    }

    impl Held {
        fn release(&self) {
            if let Some(done) = self.pending.borrow_mut().take() {
                done.complete();
            }
        }
    }

    impl Transition for Held {
        fn run(&self, _from: Option<ViewRef>, _to: Option<ViewRef>, done: Completion) {
            *self.pending.borrow_mut() = Some(done);
        }
    }

    #[test]
    fn uninitialized_stack_rejects_navigation() {
        let stack = ViewStack::new();
        assert!(!stack.is_initialized());
        assert!(matches!(
            stack.push("home"),
            Err(NavigationError::Uninitialized)
        ));
        assert!(matches!(stack.pop(), Err(NavigationError::Uninitialized)));
        assert!(stack.is_empty());
    }

    #[test]
    fn init_makes_stack_usable() {
        let stack = ViewStack::new();
        stack.init(catalog());
        assert!(stack.is_initialized());
        assert_eq!(stack.push("home").unwrap(), Navigation::Accepted);
        assert_eq!(stack.top_view_id().as_deref(), Some("home"));
    }

    #[test]
    fn push_and_pop_track_the_top() {
        let stack = ViewStack::with_factory(catalog());
        stack.push("home").unwrap();
        stack.push("settings").unwrap();

        assert_eq!(stack.view_ids(), vec!["home", "settings"]);

        stack.pop().unwrap();
        assert_eq!(stack.top_view_id().as_deref(), Some("home"));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.view_ids(), vec!["home"]);
    }

    #[test]
    fn instant_default_swaps_visibility() {
        let stack = ViewStack::with_factory(catalog());
        stack.push("home").unwrap();
        let home = stack.top_view().unwrap();
        stack.push("settings").unwrap();
        let settings = stack.top_view().unwrap();

        assert!(!home.is_active());
        assert!(settings.is_active());

        stack.pop().unwrap();
        assert!(home.is_active());
        assert!(!settings.is_active());
    }

    #[test]
    fn requests_while_in_flight_are_dropped() {
        let held = Rc::new(Held::default());
        let stack = ViewStack::with_factory(catalog());
        stack.set_default_transition(Some(held.clone()));

        assert_eq!(stack.push("home").unwrap(), Navigation::Accepted);
        assert!(stack.is_transition_in_progress());

        assert_eq!(stack.push("settings").unwrap(), Navigation::Dropped);
        assert_eq!(stack.pop().unwrap(), Navigation::Dropped);
        assert_eq!(stack.view_ids(), vec!["home"]);

        held.release();
        assert!(!stack.is_transition_in_progress());
        assert!(stack.push("settings").unwrap().is_accepted());
    }

    #[test]
    fn uninitialized_check_wins_over_in_flight_drop() {
        let stack = ViewStack::new();
        assert!(stack.pop().is_err());
    }

    #[test]
    fn unknown_view_leaves_stack_untouched() {
        let stack = ViewStack::with_factory(catalog());
        stack.push("home").unwrap();

        let err = stack.push("missing").unwrap_err();

        assert!(matches!(err, NavigationError::ViewCreation(_)));
        assert_eq!(stack.view_ids(), vec!["home"]);
        assert!(!stack.is_transition_in_progress());
    }

    #[test]
    fn failing_init_hands_view_back_to_factory() {
        let factory = catalog();
        let stack = ViewStack::with_factory(factory.clone());
        let created = Rc::new(Cell::new(0));
        {
            let created = created.clone();
            stack
                .events()
                .on_view_created(move |_, _| created.set(created.get() + 1));
        }

        let result = stack.push_with(
            "home",
            Some(Box::new(|_: &ViewRef| {
                Err(NavigationError::MissingBehaviour {
                    view: "home".into(),
                    behaviour: "Nothing",
                })
            })),
            None,
        );

        assert!(matches!(
            result,
            Err(NavigationError::MissingBehaviour { .. })
        ));
        assert!(stack.is_empty());
        assert!(!stack.is_transition_in_progress());
        assert_eq!(created.get(), 0);
        assert_eq!(factory.live_instances(), 0);
    }

    #[test]
    fn init_hook_runs_inside_the_flight() {
        let stack = ViewStack::with_factory(catalog());
        let nested = Cell::new(None);
        let inner = stack.clone();

        stack
            .push_with(
                "home",
                Some(Box::new(|_: &ViewRef| {
                    nested.set(Some(inner.push("settings")?));
                    Ok(())
                })),
                None,
            )
            .unwrap();

        assert_eq!(nested.get(), Some(Navigation::Dropped));
        assert_eq!(stack.view_ids(), vec!["home"]);
        assert!(!stack.is_transition_in_progress());
    }

    #[test]
    fn init_runs_before_the_view_is_pushed() {
        let stack = ViewStack::with_factory(catalog());
        let observed_len = Cell::new(usize::MAX);
        let probe = stack.clone();

        stack
            .push_with(
                "home",
                Some(Box::new(|view: &ViewRef| {
                    observed_len.set(probe.len());
                    view.set_active(false);
                    Ok(())
                })),
                None,
            )
            .unwrap();

        assert_eq!(observed_len.get(), 0);
        assert!(stack.top_view().unwrap().is_active());
    }

    #[test]
    fn explicit_transition_overrides_default() {
        let held = Rc::new(Held::default());
        let stack = ViewStack::with_factory(catalog());
        stack.set_default_transition(Some(held.clone()));

        stack
            .push_with("home", None, Some(Rc::new(transition::Instant)))
            .unwrap();

        assert!(!stack.is_transition_in_progress());
        assert!(held.pending.borrow().is_none());
    }

    #[test]
    fn navigate_dispatches_actions() {
        let stack = ViewStack::with_factory(catalog());
        stack
            .navigate(NavigationAction::Push("home".into()), None)
            .unwrap();
        stack
            .navigate(NavigationAction::Push("settings".into()), None)
            .unwrap();
        stack.navigate(NavigationAction::Pop, None).unwrap();

        assert_eq!(stack.view_ids(), vec!["home"]);
    }

    #[test]
    fn completing_after_stack_dropped_is_harmless() {
        let held = Rc::new(Held::default());
        let stack = ViewStack::with_factory(catalog());
        stack.set_default_transition(Some(held.clone()));
        stack.push("home").unwrap();

        drop(stack);
        held.release();
    }

    #[test]
    fn config_sets_notify_scope() {
        let config = StackConfig {
            notify_scope: NotifyScope::RootOnly,
        };
        let stack = ViewStack::with_config(catalog(), &config);
        assert_eq!(stack.notify_scope(), NotifyScope::RootOnly);
    }
}
