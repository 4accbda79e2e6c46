// SPDX-License-Identifier: MPL-2.0
//! User interface building blocks shared by the dashboard view.
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Dark/Light theme mode and its persisted choice
//! - [`notifications`] - Toast notification system for user feedback
//! - [`tooltip`] - Hover tooltips keyed by anchor name

pub mod design_tokens;
pub mod notifications;
pub mod theming;
pub mod tooltip;
