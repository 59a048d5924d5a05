//! Lifecycle notifications delivered to view components around a transition.
//!
//! Components opt in by implementing one or both handler traits and returning
//! themselves from the matching [`Component`](crate::Component) query.

use crate::view::{NotifyScope, ViewNode};

/// Told when the view it belongs to is about to be transitioned away from.
pub trait TransitionStartedHandler {
    fn handle_transition_started(&mut self);
}

/// Told when the view it belongs to has finished transitioning in.
pub trait TransitionCompleteHandler {
    fn handle_transition_complete(&mut self);
}

/// Deliver a transition-started signal to every capable component of `view`.
///
/// Returns the number of components notified.
pub fn notify_transition_started(view: &ViewNode, scope: NotifyScope) -> usize {
    let mut notified = 0;
    view.for_each_component(scope, &mut |component| {
        if let Some(handler) = component.as_transition_started() {
            handler.handle_transition_started();
            notified += 1;
        }
    });
    tracing::trace!(view = view.name(), notified, "Delivered transition-started");
    notified
}

/// Deliver a transition-complete signal to every capable component of `view`.
///
/// Returns the number of components notified.
pub fn notify_transition_complete(view: &ViewNode, scope: NotifyScope) -> usize {
    let mut notified = 0;
    view.for_each_component(scope, &mut |component| {
        if let Some(handler) = component.as_transition_complete() {
            handler.handle_transition_complete();
            notified += 1;
        }
    });
    tracing::trace!(view = view.name(), notified, "Delivered transition-complete");
    notified
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::view::Component;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Both {
        name: &'static str,
        log: Log,
    }

    impl TransitionStartedHandler for Both {
        fn handle_transition_started(&mut self) {
            self.log.borrow_mut().push(format!("started:{}", self.name));
        }
    }

    impl TransitionCompleteHandler for Both {
        fn handle_transition_complete(&mut self) {
            self.log.borrow_mut().push(format!("complete:{}", self.name));
        }
    }

    impl Component for Both {
        fn as_transition_started(&mut self) -> Option<&mut dyn TransitionStartedHandler> {
            Some(self)
        }

        fn as_transition_complete(&mut self) -> Option<&mut dyn TransitionCompleteHandler> {
            Some(self)
        }
    }

    struct StartedOnly {
        log: Log,
    }

    impl TransitionStartedHandler for StartedOnly {
        fn handle_transition_started(&mut self) {
            self.log.borrow_mut().push("started:only".into());
        }
    }

    impl Component for StartedOnly {
        fn as_transition_started(&mut self) -> Option<&mut dyn TransitionStartedHandler> {
            Some(self)
        }
    }

    struct Inert;
    impl Component for Inert {}

    fn view_with_log(log: &Log) -> crate::ViewRef {
        let child = ViewNode::builder("child")
            .component(Both {
                name: "child",
                log: log.clone(),
            })
            .build();
        ViewNode::builder("root")
            .component(Inert)
            .component(Both {
                name: "root",
                log: log.clone(),
            })
            .component(StartedOnly { log: log.clone() })
            .child(child)
            .build()
    }

    #[test]
    fn started_reaches_every_capable_component_in_order() {
        let log = Log::default();
        let view = view_with_log(&log);

        let notified = notify_transition_started(&view, NotifyScope::Descendants);

        assert_eq!(notified, 3);
        assert_eq!(
            *log.borrow(),
            vec!["started:root", "started:only", "started:child"]
        );
    }

    #[test]
    fn complete_skips_components_without_the_capability() {
        let log = Log::default();
        let view = view_with_log(&log);

        let notified = notify_transition_complete(&view, NotifyScope::Descendants);

        assert_eq!(notified, 2);
        assert_eq!(*log.borrow(), vec!["complete:root", "complete:child"]);
    }

    #[test]
    fn root_only_scope_leaves_children_alone() {
        let log = Log::default();
        let view = view_with_log(&log);

        notify_transition_complete(&view, NotifyScope::RootOnly);

        assert_eq!(*log.borrow(), vec!["complete:root"]);
    }

    #[test]
    fn view_without_handlers_notifies_nobody() {
        let view = ViewNode::builder("plain").component(Inert).build();
        assert_eq!(notify_transition_started(&view, NotifyScope::Descendants), 0);
    }
}
