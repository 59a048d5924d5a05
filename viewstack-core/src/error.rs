//! Error types for viewstack-core

use thiserror::Error;

/// Top-level error type for navigation requests.
///
/// Every variant is fatal to the call that produced it and leaves the stack
/// unchanged. A request that arrives while a transition is in flight is not an
/// error; see [`crate::Navigation::Dropped`].
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("View stack is not yet initialized; bind a view factory before navigating")]
    Uninitialized,

    #[error("View creation error: {0}")]
    ViewCreation(#[from] ViewCreationError),

    #[error("View behaviour {behaviour} is missing from view: {view}")]
    MissingBehaviour {
        view: String,
        behaviour: &'static str,
    },
}

/// Errors raised by a [`crate::ViewFactory`] when it cannot produce a view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewCreationError {
    #[error("Cannot find view configured with the id: {id}")]
    UnknownView { id: String },

    #[error("No view found at {resource} (requested for id {id})")]
    ResourceNotFound { id: String, resource: String },

    #[error("Backend failed to create view {id}: {reason}")]
    Backend { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, NavigationError>;
