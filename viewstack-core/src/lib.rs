//! viewstack-core: stack-based view navigation
//!
//! This crate provides the navigation core used by the viewstack front ends:
//!
//! - **Navigation stack** - [`ViewStack`] with push/pop, one transition in flight at a time
//! - **Views** - [`ViewNode`] hierarchies carrying [`Component`]s that opt into capabilities
//! - **Lifecycle** - transition-started/complete notifications for view components
//! - **Transitions** - the [`Transition`] contract and the built-in [`Instant`] switch
//! - **Factories** - [`ViewFactory`] and the in-process [`ViewCatalog`]
//! - **Events** - observer lists for created/destroyed/shown/hidden/transition events
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use viewstack_core::{ViewCatalog, ViewNode, ViewStack};
//!
//! let catalog = ViewCatalog::new()
//!     .view("home", |name| ViewNode::builder(name).build())
//!     .view("settings", |name| ViewNode::builder(name).build());
//!
//! let stack = ViewStack::with_factory(Rc::new(catalog));
//! stack.push("home").unwrap();
//! stack.push("settings").unwrap();
//! assert_eq!(stack.top_view_id().as_deref(), Some("settings"));
//!
//! stack.pop().unwrap();
//! assert_eq!(stack.top_view_id().as_deref(), Some("home"));
//! ```

pub mod behaviour;
pub mod config;
pub mod error;
pub mod events;
pub mod factory;
pub mod lifecycle;
pub mod stack;
pub mod transition;
pub mod view;

pub use behaviour::ViewBehaviour;
pub use config::StackConfig;
pub use error::{NavigationError, Result, ViewCreationError};
pub use events::{ListenerId, StackEvents};
pub use factory::{ViewCatalog, ViewFactory};
pub use lifecycle::{TransitionCompleteHandler, TransitionStartedHandler};
pub use stack::{InitFn, Navigation, NavigationAction, ViewStack};
pub use transition::{Completion, Instant, Transition};
pub use view::{AsAny, Component, NotifyScope, ViewBuilder, ViewNode, ViewRef};
