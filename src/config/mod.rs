// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from and saved
//! to a user-editable `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Default user name and system theme detection
//! - `[notifications]` - Toast durations and the optional demo heartbeat
//! - `[autosave]` - Draft auto-save delay
//! - `[activity]` - History capacity and panel size
//! - `[search]` - Search debounce
//!
//! Every field is optional; missing fields take the values in [`defaults`].
//! Out-of-range values are clamped by the accessor methods rather than
//! rejected, so a hand-edited file never prevents startup.
//!
//! # Examples
//!
//! ```no_run
//! use smartstudy::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.autosave.delay_ms = Some(1500);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// User name used until the user saves one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Pick the initial theme from the OS when none has been stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_system_theme: Option<bool>,
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_duration_ms: Option<u64>,

    /// Floor applied to requested durations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_transition_ms: Option<u64>,

    /// Enables simulated notification traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_interval_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_probability: Option<f64>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: Some(DEFAULT_NOTIFICATION_DURATION_MS),
            min_duration_ms: Some(DEFAULT_MIN_NOTIFICATION_DURATION_MS),
            exit_transition_ms: Some(DEFAULT_EXIT_TRANSITION_MS),
            heartbeat: Some(false),
            heartbeat_interval_secs: Some(DEFAULT_HEARTBEAT_INTERVAL_SECS),
            heartbeat_probability: Some(DEFAULT_HEARTBEAT_PROBABILITY),
        }
    }
}

/// Draft auto-save settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutosaveConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            delay_ms: Some(DEFAULT_AUTOSAVE_DELAY_MS),
        }
    }
}

/// Activity history settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_count: Option<usize>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            capacity: Some(DEFAULT_ACTIVITY_CAPACITY),
            display_count: Some(DEFAULT_ACTIVITY_DISPLAY_COUNT),
        }
    }
}

/// Search box settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: Some(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub autosave: AutosaveConfig,

    #[serde(default)]
    pub activity: ActivityConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// User name to show when none has been saved.
    #[must_use]
    pub fn default_user(&self) -> &str {
        self.general
            .default_user
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_USER_NAME)
    }

    #[must_use]
    pub fn follow_system_theme(&self) -> bool {
        self.general.follow_system_theme.unwrap_or(false)
    }

    /// Duration floor for notifications.
    #[must_use]
    pub fn min_notification_duration(&self) -> Duration {
        let ms = self
            .notifications
            .min_duration_ms
            .unwrap_or(DEFAULT_MIN_NOTIFICATION_DURATION_MS)
            .clamp(MIN_NOTIFICATION_FLOOR_MS, MAX_NOTIFICATION_FLOOR_MS);
        Duration::from_millis(ms)
    }

    /// Duration used by `show` when the caller gives none, never below the floor.
    #[must_use]
    pub fn default_notification_duration(&self) -> Duration {
        let ms = self
            .notifications
            .default_duration_ms
            .unwrap_or(DEFAULT_NOTIFICATION_DURATION_MS);
        Duration::from_millis(ms).max(self.min_notification_duration())
    }

    #[must_use]
    pub fn exit_transition(&self) -> Duration {
        let ms = self
            .notifications
            .exit_transition_ms
            .unwrap_or(DEFAULT_EXIT_TRANSITION_MS)
            .min(MAX_EXIT_TRANSITION_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn heartbeat_enabled(&self) -> bool {
        self.notifications.heartbeat.unwrap_or(false)
    }

    #[must_use]
    pub fn heartbeat_interval(&self) -> Duration {
        let secs = self
            .notifications
            .heartbeat_interval_secs
            .unwrap_or(DEFAULT_HEARTBEAT_INTERVAL_SECS)
            .clamp(MIN_HEARTBEAT_INTERVAL_SECS, MAX_HEARTBEAT_INTERVAL_SECS);
        Duration::from_secs(secs)
    }

    /// Heartbeat probability clamped to `[0, 1]`; NaN disables the heartbeat.
    #[must_use]
    pub fn heartbeat_probability(&self) -> f64 {
        let p = self
            .notifications
            .heartbeat_probability
            .unwrap_or(DEFAULT_HEARTBEAT_PROBABILITY);
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }

    #[must_use]
    pub fn autosave_delay(&self) -> Duration {
        let ms = self
            .autosave
            .delay_ms
            .unwrap_or(DEFAULT_AUTOSAVE_DELAY_MS)
            .clamp(MIN_AUTOSAVE_DELAY_MS, MAX_AUTOSAVE_DELAY_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn activity_capacity(&self) -> usize {
        self.activity
            .capacity
            .unwrap_or(DEFAULT_ACTIVITY_CAPACITY)
            .clamp(MIN_ACTIVITY_CAPACITY, MAX_ACTIVITY_CAPACITY)
    }

    /// Number of rows in the recent-activity panel, never above the capacity.
    #[must_use]
    pub fn activity_display_count(&self) -> usize {
        self.activity
            .display_count
            .unwrap_or(DEFAULT_ACTIVITY_DISPLAY_COUNT)
            .clamp(1, self.activity_capacity())
    }

    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        let ms = self
            .search
            .debounce_ms
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS)
            .min(MAX_SEARCH_DEBOUNCE_MS);
        Duration::from_millis(ms)
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a user-facing warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "settings unreadable, using defaults");
                    return (
                        Config::default(),
                        Some("Settings could not be read, defaults are in use".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific file.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration into a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Ok(()),
    }
}

/// Saves configuration to a specific file, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}
