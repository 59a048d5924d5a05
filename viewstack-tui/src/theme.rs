//! Colors and styles for the viewstack TUI.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub selection: Color,

    // Text styles
    pub bold: Style,
    pub dim: Style,
}

/// The default theme: phosphor green on near-black with a cyan accent.
pub fn default_theme() -> Theme {
    let fg = Color::Rgb(0, 255, 136); // #00ff88

    Theme {
        name: "phosphor".into(),

        bg: Color::Rgb(18, 18, 18),      // #121212
        fg,
        accent: Color::Rgb(0, 200, 255), // #00c8ff
        error: Color::Rgb(255, 85, 85),  // #ff5555

        border: Color::Rgb(60, 60, 60),    // #3c3c3c
        selection: Color::Rgb(40, 80, 40), // #285028

        bold: Style::default().fg(fg).add_modifier(Modifier::BOLD),
        dim: Style::default().fg(fg).add_modifier(Modifier::DIM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_has_name() {
        assert_eq!(default_theme().name, "phosphor");
    }

    #[test]
    fn bold_style_uses_foreground() {
        let theme = default_theme();
        assert_eq!(theme.bold.fg, Some(theme.fg));
        assert!(theme.bold.add_modifier.contains(Modifier::BOLD));
    }
}
