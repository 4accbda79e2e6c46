// SPDX-License-Identifier: MPL-2.0
//! Bounded, persisted history of user activity.
//!
//! Records are kept newest first. Appending beyond the capacity evicts the
//! oldest record, and the whole list is written back to the store as a JSON
//! array after every append so the stored list always mirrors memory.

use crate::config::DEFAULT_ACTIVITY_CAPACITY;
use crate::error::Result;
use crate::storage::{keys, Store};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One entry of the activity history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Milliseconds since the Unix epoch, bumped when needed to stay unique.
    pub id: i64,
    /// Category such as `theme_change` or `quizzes`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description.
    pub details: String,
    pub timestamp: DateTime<Utc>,
    pub user: String,
}

/// Newest-first activity history with a fixed capacity.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ACTIVITY_CAPACITY)
    }
}

impl ActivityLog {
    /// Creates an empty log keeping at most `capacity` records (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Loads the stored history, falling back to an empty log when the stored
    /// value is missing or malformed.
    #[must_use]
    pub fn load(store: &Store, capacity: usize) -> Self {
        let mut log = Self::with_capacity(capacity);
        if let Some(stored) = store.get_json::<Vec<Activity>>(keys::ACTIVITY) {
            log.entries = stored.into_iter().take(log.capacity).collect();
        }
        log
    }

    /// Records a new activity at the front of the history and persists it.
    ///
    /// The record is kept in memory even if persisting fails; the error is
    /// returned so the caller can surface it.
    pub fn log(
        &mut self,
        store: &mut Store,
        kind: &str,
        details: impl Into<String>,
        user: &str,
        now: DateTime<Utc>,
    ) -> Result<&Activity> {
        let id = self.next_id(now);
        self.entries.push_front(Activity {
            id,
            kind: kind.to_string(),
            details: details.into(),
            timestamp: now,
            user: user.to_string(),
        });
        self.entries.truncate(self.capacity);

        let persisted = self.persist(store);
        if persisted.is_ok() {
            tracing::debug!(kind, id, "activity logged");
        }
        persisted.map(|()| &self.entries[0])
    }

    /// Empties the history and persists the empty list.
    pub fn clear(&mut self, store: &mut Store) -> Result<()> {
        self.entries.clear();
        self.persist(store)
    }

    /// Returns up to `count` of the most recent records, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Activity> {
        self.entries.iter().take(count)
    }

    /// Returns up to `count` recent records whose details or type contain
    /// `query`, case-insensitively. An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str, count: usize) -> Vec<&Activity> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|activity| {
                needle.is_empty()
                    || activity.details.to_lowercase().contains(&needle)
                    || activity.kind.to_lowercase().contains(&needle)
            })
            .take(count)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let millis = now.timestamp_millis();
        match self.entries.front() {
            Some(newest) if newest.id >= millis => newest.id + 1,
            _ => millis,
        }
    }

    fn persist(&self, store: &mut Store) -> Result<()> {
        let all: Vec<&Activity> = self.entries.iter().collect();
        store.set_json(keys::ACTIVITY, &all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn log_prepends_newest_first() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();

        log.log(&mut store, "first", "one", "Student", at(0)).unwrap();
        log.log(&mut store, "second", "two", "Student", at(1)).unwrap();

        let kinds: Vec<_> = log.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["second", "first"]);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::with_capacity(3);

        for i in 0..5 {
            log.log(&mut store, "tick", format!("entry {i}"), "Student", at(i))
                .unwrap();
        }

        let details: Vec<_> = log.iter().map(|a| a.details.as_str()).collect();
        assert_eq!(details, vec!["entry 4", "entry 3", "entry 2"]);
    }

    #[test]
    fn every_append_is_persisted() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();

        log.log(&mut store, "theme_change", "Switched to light mode", "Ada", at(0))
            .unwrap();

        let stored: Vec<Activity> = store.get_json(keys::ACTIVITY).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user, "Ada");
        assert_eq!(stored[0].kind, "theme_change");
    }

    #[test]
    fn stored_json_uses_type_field() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();
        log.log(&mut store, "quizzes", "quizzes count updated to 1", "Ada", at(0))
            .unwrap();

        let raw = store.get(keys::ACTIVITY).unwrap();
        assert!(raw.contains("\"type\":\"quizzes\""));
        assert!(raw.contains("\"timestamp\""));
    }

    #[test]
    fn ids_stay_unique_within_same_millisecond() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();
        for _ in 0..3 {
            log.log(&mut store, "same", "same instant", "Ada", at(0)).unwrap();
        }

        let ids: Vec<_> = log.iter().map(|a| a.id).collect();
        assert_eq!(ids[0], ids[1] + 1);
        assert_eq!(ids[1], ids[2] + 1);
    }

    #[test]
    fn load_restores_stored_history() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();
        log.log(&mut store, "a", "first", "Ada", at(0)).unwrap();
        log.log(&mut store, "b", "second", "Ada", at(1)).unwrap();

        let reloaded = ActivityLog::load(&store, 100);
        let details: Vec<_> = reloaded.iter().map(|a| a.details.clone()).collect();
        assert_eq!(details, vec!["second", "first"]);
    }

    #[test]
    fn load_truncates_to_capacity() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::with_capacity(10);
        for i in 0..10 {
            log.log(&mut store, "x", format!("{i}"), "Ada", at(i)).unwrap();
        }

        let reloaded = ActivityLog::load(&store, 4);
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.iter().next().unwrap().details, "9");
    }

    #[test]
    fn malformed_history_loads_empty() {
        let mut store = Store::in_memory();
        store.set(keys::ACTIVITY, "[{\"broken\": ").unwrap();

        let log = ActivityLog::load(&store, 100);
        assert!(log.is_empty());
    }

    #[test]
    fn recent_limits_count() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();
        for i in 0..15 {
            log.log(&mut store, "x", format!("{i}"), "Ada", at(i)).unwrap();
        }

        let recent: Vec<_> = log.recent(10).map(|a| a.details.as_str()).collect();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0], "14");
        assert_eq!(recent[9], "5");
    }

    #[test]
    fn search_matches_details_and_type_case_insensitively() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();
        log.log(&mut store, "theme_change", "Switched to dark mode", "Ada", at(0))
            .unwrap();
        log.log(&mut store, "quizzes", "quizzes count updated to 2", "Ada", at(1))
            .unwrap();

        assert_eq!(log.search("DARK", 10).len(), 1);
        assert_eq!(log.search("theme", 10).len(), 1);
        assert_eq!(log.search("  ", 10).len(), 2);
        assert!(log.search("flashcards", 10).is_empty());
    }

    #[test]
    fn clear_persists_empty_list() {
        let mut store = Store::in_memory();
        let mut log = ActivityLog::default();
        log.log(&mut store, "x", "y", "Ada", at(0)).unwrap();

        log.clear(&mut store).unwrap();
        assert!(log.is_empty());
        assert_eq!(store.get(keys::ACTIVITY), Some("[]"));
    }
}
