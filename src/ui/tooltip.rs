// SPDX-License-Identifier: MPL-2.0
//! Hover tooltips.
//!
//! Widgets that carry a tooltip are wrapped in a mouse area; entering it
//! registers the tooltip under the widget's anchor name and leaving removes
//! it. The view renders a bubble below every anchor present in the registry.

use crate::ui::design_tokens::{radius, shadow, spacing, typography};
use iced::widget::{container, mouse_area, Column, Container, Text};
use iced::{Element, Theme};
use std::collections::HashMap;

/// Active tooltips keyed by anchor name.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    active: HashMap<String, String>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `text` for `anchor`, replacing any tooltip already shown there.
    pub fn show(&mut self, anchor: impl Into<String>, text: impl Into<String>) {
        self.active.insert(anchor.into(), text.into());
    }

    /// Hides the tooltip of `anchor`. Returns whether one was shown.
    pub fn hide(&mut self, anchor: &str) -> bool {
        self.active.remove(anchor).is_some()
    }

    #[must_use]
    pub fn text(&self, anchor: &str) -> Option<&str> {
        self.active.get(anchor).map(String::as_str)
    }

    #[must_use]
    pub fn is_shown(&self, anchor: &str) -> bool {
        self.active.contains_key(anchor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

/// Wraps `content` so hovering it emits `on_enter` / `on_exit`, and draws the
/// bubble underneath while `anchor` is registered.
pub fn with_tooltip<'a, Message: Clone + 'a>(
    content: impl Into<Element<'a, Message>>,
    anchor: &str,
    registry: &'a Registry,
    on_enter: Message,
    on_exit: Message,
) -> Element<'a, Message> {
    let area = mouse_area(content).on_enter(on_enter).on_exit(on_exit);

    match registry.text(anchor) {
        Some(text) => Column::new()
            .spacing(spacing::XXS)
            .push(area)
            .push(bubble(text))
            .into(),
        None => area.into(),
    }
}

fn bubble<'a, Message: 'a>(text: &'a str) -> Element<'a, Message> {
    Container::new(Text::new(text).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(bubble_style)
        .into()
}

fn bubble_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.strong.color.into()),
        text_color: Some(palette.background.strong.text),
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_hide_removes_entry() {
        let mut registry = Registry::new();
        registry.show("theme-toggle", "Switch theme");
        assert_eq!(registry.text("theme-toggle"), Some("Switch theme"));

        assert!(registry.hide("theme-toggle"));
        assert!(registry.is_empty());
        assert!(!registry.hide("theme-toggle"));
    }

    #[test]
    fn showing_again_replaces_the_tooltip() {
        let mut registry = Registry::new();
        registry.show("save", "Save");
        registry.show("save", "Save note (Ctrl+S)");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.text("save"), Some("Save note (Ctrl+S)"));
    }

    #[test]
    fn anchors_are_independent() {
        let mut registry = Registry::new();
        registry.show("a", "first");
        registry.show("b", "second");
        registry.hide("a");
        assert!(!registry.is_shown("a"));
        assert!(registry.is_shown("b"));
    }
}
