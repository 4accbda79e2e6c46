// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.

// ==========================================================================
// General Defaults
// ==========================================================================

/// User name shown until one is saved.
pub const DEFAULT_USER_NAME: &str = "Student";

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Auto-dismiss delay used when a caller does not specify one (in ms).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5000;

/// Shortest auto-dismiss delay a notification may have (in ms).
///
/// Requested durations below this floor, zero included, are raised to it.
pub const DEFAULT_MIN_NOTIFICATION_DURATION_MS: u64 = 500;

/// Lower bound accepted for the configurable floor (in ms).
pub const MIN_NOTIFICATION_FLOOR_MS: u64 = 100;

/// Upper bound accepted for the configurable floor (in ms).
pub const MAX_NOTIFICATION_FLOOR_MS: u64 = 10_000;

/// Delay between a dismissal and the card leaving the container (in ms).
pub const DEFAULT_EXIT_TRANSITION_MS: u64 = 300;

/// Maximum exit transition (in ms).
pub const MAX_EXIT_TRANSITION_MS: u64 = 2000;

/// Duration of the "Draft saved" confirmation toast (in ms).
pub const DRAFT_SAVED_NOTIFICATION_MS: u64 = 2000;

// ==========================================================================
// Heartbeat Defaults
// ==========================================================================

/// Interval between heartbeat rolls (in seconds).
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Minimum heartbeat interval (in seconds).
pub const MIN_HEARTBEAT_INTERVAL_SECS: u64 = 5;

/// Maximum heartbeat interval (in seconds).
pub const MAX_HEARTBEAT_INTERVAL_SECS: u64 = 3600;

/// Probability that a heartbeat roll produces a notification.
pub const DEFAULT_HEARTBEAT_PROBABILITY: f64 = 0.3;

// ==========================================================================
// Auto-save Defaults
// ==========================================================================

/// Inactivity delay before a draft is written (in ms).
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 2000;

/// Minimum auto-save delay (in ms).
pub const MIN_AUTOSAVE_DELAY_MS: u64 = 250;

/// Maximum auto-save delay (in ms).
pub const MAX_AUTOSAVE_DELAY_MS: u64 = 60_000;

/// Form identifier used when a text area belongs to no named form.
pub const DEFAULT_FORM_ID: &str = "default";

// ==========================================================================
// Activity Defaults
// ==========================================================================

/// Number of activity records kept in storage.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 100;

/// Minimum activity capacity.
pub const MIN_ACTIVITY_CAPACITY: usize = 10;

/// Maximum activity capacity.
pub const MAX_ACTIVITY_CAPACITY: usize = 1000;

/// Number of records rendered in the recent-activity panel.
pub const DEFAULT_ACTIVITY_DISPLAY_COUNT: usize = 10;

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Quiet period after the last keystroke before the search runs (in ms).
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Maximum search debounce (in ms).
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 5000;

// ==========================================================================
// Tick Defaults
// ==========================================================================

/// Period of the tick subscription while timers are pending (in ms).
pub const TICK_INTERVAL_MS: u64 = 100;

const _: () = {
    assert!(DEFAULT_MIN_NOTIFICATION_DURATION_MS >= MIN_NOTIFICATION_FLOOR_MS);
    assert!(DEFAULT_MIN_NOTIFICATION_DURATION_MS <= MAX_NOTIFICATION_FLOOR_MS);
    assert!(DEFAULT_NOTIFICATION_DURATION_MS > DEFAULT_MIN_NOTIFICATION_DURATION_MS);
    assert!(DEFAULT_EXIT_TRANSITION_MS <= MAX_EXIT_TRANSITION_MS);
    assert!(DEFAULT_AUTOSAVE_DELAY_MS >= MIN_AUTOSAVE_DELAY_MS);
    assert!(DEFAULT_ACTIVITY_DISPLAY_COUNT <= DEFAULT_ACTIVITY_CAPACITY);
    assert!(DEFAULT_ACTIVITY_CAPACITY >= MIN_ACTIVITY_CAPACITY);
    assert!(DEFAULT_HEARTBEAT_INTERVAL_SECS >= MIN_HEARTBEAT_INTERVAL_SECS);
};
