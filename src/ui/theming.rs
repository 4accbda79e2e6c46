// SPDX-License-Identifier: MPL-2.0
//! Light and dark theme handling.

use crate::error::Result;
use crate::storage::{keys, Store};
use crate::ui::design_tokens::{opacity, palette};
use iced::Color;

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surface colors
    pub surface_primary: Color,
    pub surface_secondary: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,

    pub brand_primary: Color,
    pub highlight: Color,

    pub overlay_background: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::WHITE,
            surface_secondary: palette::GRAY_100,

            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,

            brand_primary: palette::PRIMARY_500,
            highlight: palette::PRIMARY_100,

            overlay_background: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            },
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::GRAY_900,
            surface_secondary: Color::from_rgb(0.15, 0.15, 0.15),

            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,

            brand_primary: palette::PRIMARY_400,
            highlight: palette::PRIMARY_800,

            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
        }
    }
}

/// Theme mode stored under `smartstudy_theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Stored and displayed name (`dark` or `light`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    /// Detects the system theme; defaults to dark when detection fails.
    #[must_use]
    pub fn from_system() -> Self {
        if let Ok(dark_light::Mode::Light) = dark_light::detect() {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    /// Reads the stored mode.
    ///
    /// Without a valid stored value the mode comes from the system when
    /// `follow_system` is set, and is dark otherwise.
    #[must_use]
    pub fn load(store: &Store, follow_system: bool) -> Self {
        match store.get(keys::THEME) {
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                tracing::warn!(raw, "unknown stored theme, using dark");
                ThemeMode::Dark
            }),
            None if follow_system => Self::from_system(),
            None => ThemeMode::Dark,
        }
    }

    pub fn save(self, store: &mut Store) -> Result<()> {
        store.set(keys::THEME, self.as_str())
    }

    /// Label for the toggle button (names the mode it switches to).
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "☀ Light",
            ThemeMode::Light => "☾ Dark",
        }
    }

    #[must_use]
    pub fn colors(self) -> ColorScheme {
        match self {
            ThemeMode::Dark => ColorScheme::dark(),
            ThemeMode::Light => ColorScheme::light(),
        }
    }

    #[must_use]
    pub fn to_iced(self) -> iced::Theme {
        match self {
            ThemeMode::Dark => iced::Theme::Dark,
            ThemeMode::Light => iced::Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_has_light_surface() {
        let scheme = ColorScheme::light();
        assert!(scheme.surface_primary.r > 0.9);
    }

    #[test]
    fn dark_theme_has_dark_surface() {
        let scheme = ColorScheme::dark();
        assert!(scheme.surface_primary.r < 0.2);
    }

    #[test]
    fn toggling_twice_is_identity() {
        for mode in [ThemeMode::Dark, ThemeMode::Light] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn names_parse_back() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("sepia"), None);
    }

    #[test]
    fn load_defaults_to_dark() {
        let store = Store::in_memory();
        assert_eq!(ThemeMode::load(&store, false), ThemeMode::Dark);
    }

    #[test]
    fn load_falls_back_to_dark_on_garbage() {
        let mut store = Store::in_memory();
        store.set(keys::THEME, "neon").unwrap();
        assert_eq!(ThemeMode::load(&store, true), ThemeMode::Dark);
    }

    #[test]
    fn saved_mode_loads_back() {
        let mut store = Store::in_memory();
        ThemeMode::Light.save(&mut store).unwrap();
        assert_eq!(store.get(keys::THEME), Some("light"));
        assert_eq!(ThemeMode::load(&store, false), ThemeMode::Light);
    }

    #[test]
    fn iced_theme_matches_mode() {
        assert_eq!(ThemeMode::Dark.to_iced(), iced::Theme::Dark);
        assert_eq!(ThemeMode::Light.to_iced(), iced::Theme::Light);
    }
}
