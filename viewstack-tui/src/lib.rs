//! Terminal front end for viewstack.
//!
//! A small catalog of screens navigated through a [`viewstack_core::ViewStack`],
//! with slide transitions animated on the app tick. Built on ratatui and
//! crossterm.

mod app;
mod catalog;
mod config;
mod keybindings;
mod screens;
mod terminal;
mod theme;
mod transitions;

pub use app::App;
pub use catalog::{HOME, build_catalog};
pub use config::{
    ConfigLoader, DEFAULT_SLIDE_FRAMES, DEFAULT_TICK_RATE_MS, TransitionConfig, TransitionKind,
    TuiConfig, config_dir, data_dir,
};
pub use keybindings::{Action, KeyBindings};
pub use screens::{Footer, Link, Screen, ScreenArgs, render_view};
pub use terminal::{
    StackTerminal, TerminalSession, enter_screen, install_panic_hook, leave_screen,
};
pub use theme::{Theme, default_theme};
pub use transitions::SlideTransition;
