// SPDX-License-Identifier: MPL-2.0
//! Application session state.
//!
//! `Session` is the single owner of everything the dashboard shows: the
//! key/value store, the current user and theme, the activity history, the
//! notification container and every pending timer. It is created once at
//! startup and mutated synchronously by the host in response to UI events.
//!
//! Operations never fail from the caller's point of view: storage errors are
//! logged and surfaced as warning notifications, and the in-memory state is
//! updated regardless so the UI stays responsive.

use crate::activity::{Activity, ActivityLog};
use crate::autosave::{self, Autosaver};
use crate::config::{Config, DRAFT_SAVED_NOTIFICATION_MS};
use crate::error::Error;
use crate::forms::{self, Form, FormId};
use crate::progress;
use crate::storage::{keys, Store};
use crate::timer::{Scheduler, TimerHandle};
use crate::ui::notifications::{
    Heartbeat, Kind, Manager, NotificationId, NotificationMessage, Timing,
};
use crate::ui::theming::ThemeMode;
use crate::ui::tooltip;
use chrono::Utc;
use std::time::{Duration, Instant};

/// Activity type recorded when the theme changes.
pub const THEME_CHANGE_ACTIVITY: &str = "theme_change";

/// Activity type recorded when a note is submitted.
pub const NOTE_ACTIVITY: &str = "note";

/// Message shown after each auto-save.
pub const DRAFT_SAVED_MESSAGE: &str = "Draft saved";

#[derive(Debug)]
pub struct Session {
    config: Config,
    store: Store,
    user: String,
    theme: ThemeMode,
    activity: ActivityLog,
    notifications: Manager,
    autosaver: Autosaver,
    search: Search,
    tooltips: tooltip::Registry,
    sidebar_open: bool,
    modal_open: bool,
}

/// Search box text and the debounced query actually applied to the panel.
#[derive(Debug, Default)]
struct Search {
    input: String,
    applied: String,
    scheduler: Scheduler<()>,
    pending: Option<TimerHandle>,
}

impl Session {
    /// Builds the session from loaded configuration and store contents.
    pub fn new(config: Config, store: Store, now: Instant) -> Self {
        let user = store
            .get(keys::USER)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(config.default_user())
            .to_string();
        let theme = ThemeMode::load(&store, config.follow_system_theme());
        let activity = ActivityLog::load(&store, config.activity_capacity());

        let mut notifications = Manager::new(Timing::from_config(&config));
        if config.heartbeat_enabled() {
            notifications.enable_heartbeat(Heartbeat::from_config(&config), now);
        }
        let autosaver = Autosaver::new(config.autosave_delay());

        tracing::info!(
            %user,
            theme = theme.as_str(),
            activities = activity.len(),
            "session started"
        );

        Self {
            config,
            store,
            user,
            theme,
            activity,
            notifications,
            autosaver,
            search: Search::default(),
            tooltips: tooltip::Registry::new(),
            sidebar_open: true,
            modal_open: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    #[must_use]
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    #[must_use]
    pub fn notifications(&self) -> &Manager {
        &self.notifications
    }

    #[must_use]
    pub fn tooltips(&self) -> &tooltip::Registry {
        &self.tooltips
    }

    pub fn tooltips_mut(&mut self) -> &mut tooltip::Registry {
        &mut self.tooltips
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    #[must_use]
    pub fn stat_count(&self, stat_type: &str) -> u64 {
        progress::count(&self.store, stat_type)
    }

    // =========================================================================
    // Exposed operations
    // =========================================================================

    /// Appends an activity record attributed to the current user.
    pub fn log_activity(&mut self, kind: &str, details: impl Into<String>, now: Instant) {
        let result = self
            .activity
            .log(&mut self.store, kind, details, &self.user, Utc::now())
            .map(|_| ());
        self.report(result, now);
    }

    /// Adds `increment` to the counter of `stat_type`, then logs it.
    ///
    /// Returns the new count.
    pub fn update_progress(&mut self, stat_type: &str, increment: i64, now: Instant) -> u64 {
        let updated = match progress::update_progress(&mut self.store, stat_type, increment) {
            Ok(count) => count,
            Err(err) => {
                self.report_error(&err, now);
                // The store keeps the new value in memory even when the write fails.
                progress::count(&self.store, stat_type)
            }
        };
        self.log_activity(stat_type, progress::activity_details(stat_type, updated), now);
        updated
    }

    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        kind: Kind,
        duration: Option<Duration>,
        now: Instant,
    ) -> NotificationId {
        self.notifications.show(message, kind, duration, now)
    }

    pub fn dismiss_notification(&mut self, id: NotificationId, now: Instant) -> bool {
        self.notifications.dismiss(id, now)
    }

    pub fn handle_notification_message(&mut self, message: &NotificationMessage, now: Instant) {
        self.notifications.handle_message(message, now);
    }

    /// Flips between dark and light, persists the choice and logs it.
    pub fn toggle_theme(&mut self, now: Instant) -> ThemeMode {
        self.theme = self.theme.toggled();
        let saved = self.theme.save(&mut self.store);
        self.report(saved, now);
        tracing::info!(theme = self.theme.as_str(), "theme changed");
        self.log_activity(
            THEME_CHANGE_ACTIVITY,
            format!("Switched to {} mode", self.theme.as_str()),
            now,
        );
        self.theme
    }

    /// Shows or hides the sidebar. Returns whether it is now open.
    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    /// Stores `value` under `smartstudy_<key>`.
    pub fn save_user_preference(&mut self, key: &str, value: &str, now: Instant) {
        let saved = self.store.set(&keys::preference(key), value);
        if saved.is_ok() {
            tracing::info!(key, "preference saved");
        }
        self.report(saved, now);
    }

    /// Changes the current user. Blank names are ignored.
    pub fn set_user_name(&mut self, name: &str, now: Instant) -> bool {
        let name = name.trim();
        if name.is_empty() || name == self.user {
            return false;
        }
        self.user = name.to_string();
        self.save_user_preference("user", name, now);
        true
    }

    // =========================================================================
    // Drafts and notes
    // =========================================================================

    /// Records an edit of `form`'s text area; the draft is written once the
    /// editor has been idle for the auto-save delay.
    pub fn on_draft_input(&mut self, form: &FormId, value: impl Into<String>, now: Instant) {
        self.autosaver.on_input(form, value, now);
    }

    #[must_use]
    pub fn load_draft(&self, form: &FormId) -> String {
        autosave::load_draft(&self.store, form)
    }

    /// Validates `form` and, when valid, records it as a saved note and
    /// discards its draft. Returns whether the note was saved.
    pub fn submit_note(&mut self, form: &mut Form, now: Instant) -> bool {
        if !forms::validate_form(form) {
            self.notifications.show(
                "Please fill in the required fields",
                Kind::Warning,
                None,
                now,
            );
            return false;
        }

        self.autosaver.cancel(&form.id);
        let removed = self.store.remove(&keys::draft(form.id.as_str()));
        self.report(removed, now);

        let title = form
            .field("title")
            .map(|field| field.value.trim().to_string())
            .unwrap_or_default();
        self.log_activity(NOTE_ACTIVITY, format!("Saved note: {title}"), now);
        self.notifications.show("Note saved", Kind::Success, None, now);
        true
    }

    // =========================================================================
    // Activity panel
    // =========================================================================

    /// Updates the search box; the panel filter follows after the debounce.
    pub fn set_search_query(&mut self, query: impl Into<String>, now: Instant) {
        self.search.input = query.into();
        if let Some(previous) = self.search.pending.take() {
            self.search.scheduler.cancel(previous);
        }
        self.search.pending = Some(self.search.scheduler.schedule(
            now,
            self.config.search_debounce(),
            (),
        ));
    }

    /// Text currently typed in the search box.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search.input
    }

    /// Query the activity panel is filtered by.
    #[must_use]
    pub fn applied_search(&self) -> &str {
        &self.search.applied
    }

    /// Rows of the recent-activity panel, newest first.
    #[must_use]
    pub fn recent_activity(&self) -> Vec<&Activity> {
        self.activity
            .search(&self.search.applied, self.config.activity_display_count())
    }

    pub fn clear_activity(&mut self, now: Instant) {
        let cleared = self.activity.clear(&mut self.store);
        if cleared.is_ok() {
            tracing::info!("activity history cleared");
        }
        self.report(cleared, now);
    }

    // =========================================================================
    // Modal
    // =========================================================================

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    /// Closes the modal. Returns whether one was open.
    pub fn close_modal(&mut self) -> bool {
        std::mem::replace(&mut self.modal_open, false)
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        self.notifications.tick(now);

        let report = self.autosaver.tick(&mut self.store, now, Utc::now());
        for _ in &report.saved {
            self.notifications.show(
                DRAFT_SAVED_MESSAGE,
                Kind::Success,
                Some(Duration::from_millis(DRAFT_SAVED_NOTIFICATION_MS)),
                now,
            );
        }
        for (_, err) in &report.failed {
            self.report_error(err, now);
        }

        if !self.search.scheduler.take_due(now).is_empty() {
            self.search.pending = None;
            self.search.applied = self.search.input.trim().to_string();
            tracing::debug!(query = %self.search.applied, "activity filter applied");
        }
    }

    /// Returns whether the host needs to keep delivering ticks.
    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        self.notifications.has_pending_timers()
            || self.autosaver.has_pending()
            || !self.search.scheduler.is_empty()
    }

    /// Shows a warning notification, e.g. for a startup problem.
    pub fn warn(&mut self, message: impl Into<String>, now: Instant) {
        self.notifications.show(message, Kind::Warning, None, now);
    }

    fn report(&mut self, result: crate::error::Result<()>, now: Instant) {
        if let Err(err) = result {
            self.report_error(&err, now);
        }
    }

    fn report_error(&mut self, err: &Error, now: Instant) {
        tracing::warn!(error = %err, "storage operation failed");
        self.notifications
            .show(err.user_message(), Kind::Warning, None, now);
    }
}
