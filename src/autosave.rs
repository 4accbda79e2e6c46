// SPDX-License-Identifier: MPL-2.0
//! Debounced draft auto-save.
//!
//! Each edit of a text area replaces the pending save for its form: the
//! previous timer is cancelled and a new one is scheduled, so only the last
//! value of a burst of edits is written once the editor has been idle for the
//! configured delay.

use crate::error::{Error, Result};
use crate::forms::FormId;
use crate::storage::{keys, Store};
use crate::timer::{Scheduler, TimerHandle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Stored draft payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub value: String,
    /// Milliseconds since the Unix epoch at save time.
    pub timestamp: i64,
}

/// Outcome of one [`Autosaver::tick`].
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Forms whose draft was written.
    pub saved: Vec<FormId>,
    /// Forms whose write failed. Their edit is dropped, not retried.
    pub failed: Vec<(FormId, Error)>,
}

#[derive(Debug)]
struct PendingSave {
    handle: TimerHandle,
    value: String,
}

/// Tracks pending draft saves for any number of forms.
#[derive(Debug)]
pub struct Autosaver {
    delay: Duration,
    scheduler: Scheduler<FormId>,
    pending: HashMap<FormId, PendingSave>,
}

impl Autosaver {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduler: Scheduler::new(),
            pending: HashMap::new(),
        }
    }

    /// Records an edit and (re)starts the idle timer of `form`.
    pub fn on_input(&mut self, form: &FormId, value: impl Into<String>, now: Instant) {
        if let Some(previous) = self.pending.remove(form) {
            self.scheduler.cancel(previous.handle);
        }
        let handle = self.scheduler.schedule(now, self.delay, form.clone());
        self.pending.insert(
            form.clone(),
            PendingSave {
                handle,
                value: value.into(),
            },
        );
    }

    /// Drops the pending save of `form`, if any.
    pub fn cancel(&mut self, form: &FormId) -> bool {
        match self.pending.remove(form) {
            Some(previous) => self.scheduler.cancel(previous.handle),
            None => false,
        }
    }

    /// Writes every draft whose idle timer has elapsed.
    pub fn tick(
        &mut self,
        store: &mut Store,
        now: Instant,
        wall_clock: DateTime<Utc>,
    ) -> SaveReport {
        let mut report = SaveReport::default();

        for form in self.scheduler.take_due(now) {
            let Some(pending) = self.pending.remove(&form) else {
                continue;
            };
            match save_draft(store, &form, pending.value, wall_clock) {
                Ok(()) => report.saved.push(form),
                Err(err) => {
                    tracing::warn!(form = %form, error = %err, "draft save failed");
                    report.failed.push((form, err));
                }
            }
        }

        report
    }

    /// Returns whether `form` has an unsaved edit waiting for its timer.
    #[must_use]
    pub fn is_pending(&self, form: &FormId) -> bool {
        self.pending.contains_key(form)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.scheduler.is_empty()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Writes `value` as the draft of `form`.
pub fn save_draft(
    store: &mut Store,
    form: &FormId,
    value: String,
    wall_clock: DateTime<Utc>,
) -> Result<()> {
    let draft = Draft {
        value,
        timestamp: wall_clock.timestamp_millis(),
    };
    store.set_json(&keys::draft(form.as_str()), &draft)?;
    tracing::info!(form = %form, "draft saved");
    Ok(())
}

/// Returns the saved draft text of `form`, or an empty string.
#[must_use]
pub fn load_draft(store: &Store, form: &FormId) -> String {
    store
        .get_json::<Draft>(&keys::draft(form.as_str()))
        .map(|draft| draft.value)
        .unwrap_or_default()
}
