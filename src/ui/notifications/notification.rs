// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and the `Kind` enum used
//! throughout the notification system.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::Duration;

/// Unique identifier for a notification, issued by the manager that shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(crate) u64);

/// Notification kind determines the accent color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    /// Operation completed successfully (green).
    Success,
    /// Something went wrong (red).
    Error,
    /// Needs attention but nothing failed (amber).
    Warning,
    /// Neutral information (blue).
    #[default]
    Info,
}

impl Kind {
    /// Returns the accent color for this kind.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Kind::Success => palette::SUCCESS_500,
            Kind::Error => palette::ERROR_500,
            Kind::Warning => palette::WARNING_500,
            Kind::Info => palette::INFO_500,
        }
    }

    /// Returns the glyph shown at the start of the card.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Kind::Success => "✔",
            Kind::Error => "✖",
            Kind::Warning => "⚠",
            Kind::Info => "ℹ",
        }
    }

    /// Parses a kind name; unknown names fall back to `Info`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Kind::Success,
            "error" => Kind::Error,
            "warning" => Kind::Warning,
            _ => Kind::Info,
        }
    }
}

/// Where a notification is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Displayed and waiting for its auto-dismiss timer.
    Visible,
    /// Dismissed; leaves the container once the exit transition ends.
    Exiting,
}

/// A notification card.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    message: String,
    duration: Duration,
    phase: Phase,
}

impl Notification {
    pub(crate) fn new(
        id: NotificationId,
        kind: Kind,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
            duration,
            phase: Phase::Visible,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Auto-dismiss delay after clamping.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.phase == Phase::Exiting
    }

    pub(crate) fn begin_exit(&mut self) {
        self.phase = Phase::Exiting;
    }
}
