// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::progress::StatKind;
use crate::shortcuts::Shortcut;
use crate::ui::notifications;
use iced::widget::text_editor;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Notification(notifications::NotificationMessage),
    /// Periodic tick while any timer is pending.
    Tick(Instant),
    Shortcut(Shortcut),
    ToggleTheme,
    ToggleMobileMenu,
    OpenHelp,
    CloseHelp,
    NoteTitleChanged(String),
    NoteBodyEdited(text_editor::Action),
    SubmitNote,
    SearchChanged(String),
    ClearActivity,
    UserNameChanged(String),
    SaveUserName,
    IncrementStat(StatKind),
    TooltipShow(&'static str),
    TooltipHide(&'static str),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional data directory override (for the key/value store).
    /// Takes precedence over `SMARTSTUDY_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `SMARTSTUDY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Force the notification heartbeat on, whatever the config says.
    pub heartbeat: bool,
}
