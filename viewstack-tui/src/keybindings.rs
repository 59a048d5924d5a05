//! Key bindings for the viewstack TUI.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    /// Open the highlighted link.
    Select,
    /// Return to the previous view.
    Back,
}

/// Map from key presses to actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeyBindings {
    /// Resolve a key press to an action.
    ///
    /// Only the key code and modifiers take part in the lookup.
    pub fn resolve(&self, key: KeyEvent) -> Option<Action> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Add or replace a binding.
    pub fn bind(&mut self, key: KeyEvent, action: Action) {
        self.bindings.insert(KeyEvent::new(key.code, key.modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Vim style
        bindings.insert(key('j'), Action::Down);
        bindings.insert(key('k'), Action::Up);
        bindings.insert(key('l'), Action::Select);
        bindings.insert(key('h'), Action::Back);

        // Arrow keys
        bindings.insert(key_code(KeyCode::Down), Action::Down);
        bindings.insert(key_code(KeyCode::Up), Action::Up);
        bindings.insert(key_code(KeyCode::Right), Action::Select);
        bindings.insert(key_code(KeyCode::Left), Action::Back);

        bindings.insert(key_code(KeyCode::Enter), Action::Select);
        bindings.insert(key_code(KeyCode::Esc), Action::Back);
        bindings.insert(key_code(KeyCode::Backspace), Action::Back);
        bindings.insert(key('q'), Action::Quit);

        Self { bindings }
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
