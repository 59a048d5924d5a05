//! Instantiated views and the components attached to them.
//!
//! A view is a small tree of [`ViewNode`]s. Each node carries an ordered list
//! of [`Component`]s, and components opt into lifecycle capabilities by
//! overriding the `as_*` query methods. Typed lookups downcast through
//! [`AsAny`], so no names or reflection are involved.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::lifecycle::{TransitionCompleteHandler, TransitionStartedHandler};

/// Shared handle to an instantiated view.
pub type ViewRef = Rc<ViewNode>;

/// Which nodes of a view are visited when delivering notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyScope {
    /// The root node and every descendant.
    #[default]
    Descendants,
    /// The root node only.
    RootOnly,
}

/// Upcast to [`Any`] for typed behaviour lookups.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A behaviour attached to a view node.
///
/// Capabilities are opt-in: a component that wants lifecycle notifications
/// overrides the matching query and returns `Some(self)`.
pub trait Component: AsAny {
    /// Query for the transition-started capability.
    fn as_transition_started(&mut self) -> Option<&mut dyn TransitionStartedHandler> {
        None
    }

    /// Query for the transition-complete capability.
    fn as_transition_complete(&mut self) -> Option<&mut dyn TransitionCompleteHandler> {
        None
    }
}

/// A node in an instantiated view hierarchy.
pub struct ViewNode {
    name: String,
    active: Cell<bool>,
    components: Vec<RefCell<Box<dyn Component>>>,
    children: Vec<ViewRef>,
}

impl ViewNode {
    /// Start building a node with the given name.
    pub fn builder(name: impl Into<String>) -> ViewBuilder {
        ViewBuilder {
            name: name.into(),
            active: true,
            components: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the node is currently shown.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    pub fn children(&self) -> &[ViewRef] {
        &self.children
    }

    /// Visit components depth-first in pre-order.
    ///
    /// The node's own components come first, in insertion order, followed by
    /// each child subtree in insertion order. With [`NotifyScope::RootOnly`]
    /// the children are skipped. A component that is already borrowed further
    /// up the call stack is skipped rather than visited twice.
    pub fn for_each_component(&self, scope: NotifyScope, f: &mut dyn FnMut(&mut dyn Component)) {
        for cell in &self.components {
            match cell.try_borrow_mut() {
                Ok(mut guard) => f(&mut **guard),
                Err(_) => {
                    tracing::warn!(view = %self.name, "Skipping component that is already in use");
                }
            }
        }

        if scope == NotifyScope::Descendants {
            for child in &self.children {
                child.for_each_component(scope, f);
            }
        }
    }

    /// Run `f` against the first component of type `B` on this node.
    ///
    /// Only the node itself is searched, not its children. Returns `None` when
    /// no such component is attached.
    pub fn with_behaviour<B: Component, R>(&self, f: impl FnOnce(&mut B) -> R) -> Option<R> {
        for cell in &self.components {
            let Ok(mut guard) = cell.try_borrow_mut() else {
                continue;
            };
            let component: &mut dyn Component = &mut **guard;
            if let Some(behaviour) = (*component).as_any_mut().downcast_mut::<B>() {
                return Some(f(behaviour));
            }
        }
        None
    }

    /// Whether a component of type `B` is attached to this node.
    pub fn has_behaviour<B: Component>(&self) -> bool {
        self.components.iter().any(|cell| {
            cell.try_borrow()
                .map(|guard| {
                    let component: &dyn Component = &**guard;
                    (*component).as_any().is::<B>()
                })
                .unwrap_or(false)
        })
    }
}

impl fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("name", &self.name)
            .field("active", &self.active.get())
            .field("components", &self.components.len())
            .field("children", &self.children)
            .finish()
    }
}

/// Builder for [`ViewNode`].
pub struct ViewBuilder {
    name: String,
    active: bool,
    components: Vec<Box<dyn Component>>,
    children: Vec<ViewRef>,
}

impl ViewBuilder {
    pub fn component(mut self, component: impl Component) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn child(mut self, child: ViewRef) -> Self {
        self.children.push(child);
        self
    }

    /// Initial visibility. Nodes start active.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn build(self) -> ViewRef {
        Rc::new(ViewNode {
            name: self.name,
            active: Cell::new(self.active),
            components: self.components.into_iter().map(RefCell::new).collect(),
            children: self.children,
        })
    }
}
