//! Screen components and how they are drawn.
//!
//! This module provides:
//! - `Screen`, the behaviour every catalog view carries on its root node
//! - `Footer`, a child component that tracks whether its view is being left
//! - `render_view` for drawing an instantiated view

mod footer;
mod render;
mod screen;

pub use footer::Footer;
pub use render::render_view;
pub use screen::{Link, Screen, ScreenArgs};
