//! Stack configuration.

use serde::{Deserialize, Serialize};

use crate::view::NotifyScope;

/// Settings applied to a [`crate::ViewStack`] at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// How far lifecycle notifications reach into a view's hierarchy.
    pub notify_scope: NotifyScope,
}
