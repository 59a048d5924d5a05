//! The screens the TUI can navigate between.

use viewstack_core::{ViewCatalog, ViewNode, ViewRef};

use crate::screens::{Footer, Screen};

/// Id of the root screen.
pub const HOME: &str = "home";

const FOOTER_HINT: &str = "j/k move  enter open  esc back  q quit";

fn screen_view(name: &str, screen: Screen) -> ViewRef {
    let footer = ViewNode::builder(format!("{name}/footer"))
        .component(Footer::new(FOOTER_HINT))
        .build();
    ViewNode::builder(name)
        .component(screen)
        .child(footer)
        .build()
}

/// Build the catalog of demo screens.
///
/// `detail` and `detail-notes` share one resource, so both ids produce the
/// same kind of screen.
pub fn build_catalog() -> ViewCatalog {
    ViewCatalog::new()
        .view(HOME, |name| {
            screen_view(
                name,
                Screen::new("Home", "Pick a section. Each choice pushes a view on the stack.")
                    .link("Library", "library")
                    .link("Settings", "settings")
                    .link("About", "about"),
            )
        })
        .view("library", |name| {
            screen_view(
                name,
                Screen::new("Library", "Entries open as nested views.")
                    .link("First entry", "detail")
                    .link("Notes", "detail-notes")
                    .link("Back to settings", "settings"),
            )
        })
        .define("detail", "screens/detail")
        .define("detail-notes", "screens/detail")
        .resource("screens/detail", |name| {
            screen_view(
                name,
                Screen::new("Detail", "The deepest level. Press esc to go back.")
                    .link("About", "about"),
            )
        })
        .view("settings", |name| {
            screen_view(
                name,
                Screen::new("Settings", "Transitions and scope are read from config.toml.")
                    .link("Library", "library"),
            )
        })
        .view("about", |name| {
            screen_view(
                name,
                Screen::new("About", "viewstack: a stack of views with animated transitions."),
            )
        })
}
