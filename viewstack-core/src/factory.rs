//! View creation and destruction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::ViewCreationError;
use crate::view::ViewRef;

/// Creates and destroys view instances on behalf of a [`crate::ViewStack`].
pub trait ViewFactory {
    /// Instantiate the view registered under `id`.
    fn create(&self, id: &str) -> Result<ViewRef, ViewCreationError>;

    /// Release a view previously returned by [`create`](Self::create).
    ///
    /// Calling this more than once for the same view must be harmless.
    fn destroy(&self, id: &str, view: ViewRef);
}

type Blueprint = Box<dyn Fn(&str) -> ViewRef>;

/// A [`ViewFactory`] backed by an in-process catalog.
///
/// View ids map to resource keys, and resource keys map to blueprints that
/// build a fresh view tree. Several ids may share one resource.
#[derive(Default)]
pub struct ViewCatalog {
    definitions: HashMap<String, String>,
    resources: HashMap<String, Blueprint>,
    live: RefCell<Vec<ViewRef>>,
}

impl ViewCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` as an instance of `resource`.
    pub fn define(mut self, id: impl Into<String>, resource: impl Into<String>) -> Self {
        self.definitions.insert(id.into(), resource.into());
        self
    }

    /// Register the blueprint for `resource`.
    ///
    /// The blueprint receives the resource key, which it should use as the
    /// root node's name.
    pub fn resource(
        mut self,
        resource: impl Into<String>,
        blueprint: impl Fn(&str) -> ViewRef + 'static,
    ) -> Self {
        self.resources.insert(resource.into(), Box::new(blueprint));
        self
    }

    /// Shorthand for a view whose id and resource key are the same.
    pub fn view(self, id: &str, blueprint: impl Fn(&str) -> ViewRef + 'static) -> Self {
        self.define(id, id).resource(id, blueprint)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Sorted list of defined view ids.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of instances created and not yet destroyed.
    pub fn live_instances(&self) -> usize {
        self.live.borrow().len()
    }
}

impl ViewFactory for ViewCatalog {
    fn create(&self, id: &str) -> Result<ViewRef, ViewCreationError> {
        let resource = self
            .definitions
            .get(id)
            .ok_or_else(|| ViewCreationError::UnknownView { id: id.to_string() })?;

        let blueprint =
            self.resources
                .get(resource)
                .ok_or_else(|| ViewCreationError::ResourceNotFound {
                    id: id.to_string(),
                    resource: resource.clone(),
                })?;

        let view = blueprint(resource.as_str());
        self.live.borrow_mut().push(view.clone());
        tracing::debug!(id, resource = %resource, "Instantiated view");
        Ok(view)
    }

    fn destroy(&self, id: &str, view: ViewRef) {
        let mut live = self.live.borrow_mut();
        let Some(index) = live.iter().position(|held| Rc::ptr_eq(held, &view)) else {
            tracing::trace!(id, "View already destroyed");
            return;
        };
        live.swap_remove(index);
        view.set_active(false);
        tracing::debug!(id, "Destroyed view");
    }
}

impl fmt::Debug for ViewCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCatalog")
            .field("definitions", &self.definitions)
            .field("resources", &self.resources.len())
            .field("live", &self.live.borrow().len())
            .finish()
    }
}
