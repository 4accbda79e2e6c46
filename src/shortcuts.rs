// SPDX-License-Identifier: MPL-2.0
//! Global keyboard shortcuts.
//!
//! `Cmd` on macOS and `Ctrl` elsewhere (iced's "command" modifier).

use iced::keyboard::{self, key::Named};

/// Action bound to a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Cmd/Ctrl+S: submit the note form.
    Save,
    /// Cmd/Ctrl+K: focus the search box.
    FocusSearch,
    /// Cmd/Ctrl+D: toggle the theme.
    ToggleTheme,
    /// Escape: close the open modal.
    CloseModal,
}

impl Shortcut {
    /// Every shortcut with its key label, in help-screen order.
    pub const ALL: [(Shortcut, &'static str); 4] = [
        (Shortcut::Save, "Ctrl+S"),
        (Shortcut::FocusSearch, "Ctrl+K"),
        (Shortcut::ToggleTheme, "Ctrl+D"),
        (Shortcut::CloseModal, "Esc"),
    ];

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Shortcut::Save => "Save the current note",
            Shortcut::FocusSearch => "Search activity",
            Shortcut::ToggleTheme => "Toggle light/dark theme",
            Shortcut::CloseModal => "Close dialog",
        }
    }
}

/// Maps a key press to its shortcut, if any.
#[must_use]
pub fn from_key_press(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Shortcut> {
    match key {
        keyboard::Key::Named(Named::Escape) => Some(Shortcut::CloseModal),
        keyboard::Key::Character(ref c) if modifiers.command() => {
            match c.to_lowercase().as_str() {
                "s" => Some(Shortcut::Save),
                "k" => Some(Shortcut::FocusSearch),
                "d" => Some(Shortcut::ToggleTheme),
                _ => None,
            }
        }
        _ => None,
    }
}
