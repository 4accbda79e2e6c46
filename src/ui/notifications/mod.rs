// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily in the bottom-right corner to report
//! the outcome of an action (draft saved, storage failure, etc.) without
//! blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with its kind and phase
//! - [`manager`] - `Manager` owning the container and its timers
//! - [`toast`] - Toast widget component for rendering notifications
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Kind, Manager};
//!
//! let mut manager = Manager::default();
//! let id = manager.show("Draft saved", Kind::Success, None, Instant::now());
//!
//! // Drive the timers from the host's tick
//! manager.tick(Instant::now());
//!
//! // In your view function, render toasts
//! let toast_overlay = Toast::view_overlay(&manager).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Heartbeat, Manager, Message as NotificationMessage, Timing};
pub use notification::{Kind, Notification, NotificationId, Phase};
pub use toast::Toast;
