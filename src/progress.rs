// SPDX-License-Identifier: MPL-2.0
//! Per-type progress counters shown on the dashboard stat cards.

use crate::error::Result;
use crate::storage::{keys, Store};

/// Stat types with a card on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Summaries,
    Flashcards,
    Quizzes,
    Questions,
}

impl StatKind {
    /// Every stat type, in display order.
    pub const ALL: [StatKind; 4] = [
        StatKind::Summaries,
        StatKind::Flashcards,
        StatKind::Quizzes,
        StatKind::Questions,
    ];

    /// Name used in storage keys and activity records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Summaries => "summaries",
            StatKind::Flashcards => "flashcards",
            StatKind::Quizzes => "quizzes",
            StatKind::Questions => "questions",
        }
    }

    /// Card title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Summaries => "Summaries",
            StatKind::Flashcards => "Flashcards",
            StatKind::Quizzes => "Quizzes",
            StatKind::Questions => "Questions",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Returns the stored counter of `stat_type` (zero when absent or unparsable).
#[must_use]
pub fn count(store: &Store, stat_type: &str) -> u64 {
    store.get_count(&keys::progress_count(stat_type))
}

/// Adds `increment` to the counter of `stat_type` and persists it.
///
/// Negative increments are allowed; the counter never goes below zero.
/// Returns the new value.
pub fn update_progress(store: &mut Store, stat_type: &str, increment: i64) -> Result<u64> {
    let current = count(store, stat_type);
    let updated = current.saturating_add_signed(increment);
    store.set(&keys::progress_count(stat_type), updated.to_string())?;
    tracing::info!(stat_type, count = updated, "progress updated");
    Ok(updated)
}

/// Details text recorded in the activity log for a counter change.
#[must_use]
pub fn activity_details(stat_type: &str, count: u64) -> String {
    format!("{stat_type} count updated to {count}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_accumulate() {
        let mut store = Store::in_memory();
        assert_eq!(count(&store, "quizzes"), 0);

        assert_eq!(update_progress(&mut store, "quizzes", 1).unwrap(), 1);
        assert_eq!(update_progress(&mut store, "quizzes", 3).unwrap(), 4);
        assert_eq!(store.get("smartstudy_quizzes_count"), Some("4"));
    }

    #[test]
    fn unparsable_counter_restarts_from_zero() {
        let mut store = Store::in_memory();
        store.set(&keys::progress_count("summaries"), "lots").unwrap();
        assert_eq!(update_progress(&mut store, "summaries", 1).unwrap(), 1);
    }

    #[test]
    fn negative_increment_saturates_at_zero() {
        let mut store = Store::in_memory();
        update_progress(&mut store, "flashcards", 2).unwrap();
        assert_eq!(update_progress(&mut store, "flashcards", -5).unwrap(), 0);
    }

    #[test]
    fn stat_kind_names_round_trip() {
        for kind in StatKind::ALL {
            assert_eq!(StatKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(StatKind::from_name("essays"), None);
    }

    #[test]
    fn activity_details_reads_naturally() {
        assert_eq!(activity_details("quizzes", 3), "quizzes count updated to 3");
    }
}
