// SPDX-License-Identifier: MPL-2.0
//! Persistent string key/value store.
//!
//! The store is an in-memory ordered map that is written through to a single
//! CBOR file (`storage.cbor`) in the application data directory on every
//! mutation. Values are plain strings; structured values (activity history,
//! drafts) are JSON-encoded through [`Store::get_json`] / [`Store::set_json`].
//!
//! Reads never fail: a missing key reads as `None`, and a value that no longer
//! decodes is reported as `None` with a warning so callers fall back to their
//! default.
//!
//! # Path Resolution
//!
//! 1. Use [`Store::open_in`] with an explicit directory
//! 2. Set `SMARTSTUDY_DATA_DIR` environment variable (or `--data-dir`)
//! 3. Falls back to platform-specific data directory

pub mod keys;

use crate::app::paths;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Store file name within the app data directory.
const STORE_FILE: &str = "storage.cbor";

/// String key/value store, optionally backed by a file.
#[derive(Debug, Default)]
pub struct Store {
    entries: BTreeMap<String, String>,
    path: Option<PathBuf>,
    writes: u64,
}

impl Store {
    /// Creates a store that lives only in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store from the default data directory.
    ///
    /// Returns a tuple of (store, optional_warning). The warning is a
    /// user-facing message describing why previous data could not be read;
    /// the store is then empty but still writes to the default location.
    pub fn open() -> (Self, Option<String>) {
        Self::open_with_override(None)
    }

    /// Opens the store from a specific directory.
    pub fn open_in(dir: &Path) -> (Self, Option<String>) {
        Self::open_with_override(Some(dir.to_path_buf()))
    }

    fn open_with_override(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STORE_FILE);
            path
        }) else {
            tracing::warn!("no data directory available, storage will not persist");
            return (
                Self::in_memory(),
                Some("Storage is unavailable, changes will not be kept".to_string()),
            );
        };

        let mut store = Self {
            path: Some(path.clone()),
            ..Self::default()
        };

        if !path.exists() {
            return (store, None);
        }

        match read_entries(&path) {
            Ok(entries) => {
                tracing::debug!(path = %path.display(), count = entries.len(), "storage loaded");
                store.entries = entries;
                (store, None)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "storage unreadable, starting empty");
                (
                    store,
                    Some("Saved data could not be read and was reset".to_string()),
                )
            }
        }
    }

    /// Returns the file backing this store, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` under `key` and writes the store through to disk.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    /// Removes `key`, writing through if it was present.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()
        } else {
            Ok(())
        }
    }

    /// Decodes the JSON value under `key`.
    ///
    /// Returns `None` if the key is absent or its value does not decode.
    #[must_use]
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "stored value is not valid JSON, using default");
                None
            }
        }
    }

    /// Encodes `value` as JSON and stores it under `key`.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, encoded)
    }

    /// Reads an integer counter, treating absent or unparsable values as zero.
    #[must_use]
    pub fn get_count(&self, key: &str) -> u64 {
        match self.get(key) {
            None => 0,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, raw, "stored counter is not a number, using 0");
                0
            }),
        }
    }

    /// Returns the stored keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of successful mutations since the store was opened.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let file = fs::File::create(path)?;
            ciborium::into_writer(&self.entries, BufWriter::new(file))?;
        }
        self.writes += 1;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    let file = fs::File::open(path)?;
    let entries = ciborium::from_reader(BufReader::new(file))?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        value: String,
        timestamp: i64,
    }

    #[test]
    fn in_memory_store_round_trips_values() {
        let mut store = Store::in_memory();
        store.set(keys::USER, "Ada").expect("set");

        assert_eq!(store.get(keys::USER), Some("Ada"));
        assert!(store.path().is_none());
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = Store::in_memory();
        assert!(store.get("smartstudy_missing").is_none());
        assert!(store.get_json::<Sample>("smartstudy_missing").is_none());
    }

    #[test]
    fn json_helpers_round_trip() {
        let mut store = Store::in_memory();
        let sample = Sample {
            value: "notes".into(),
            timestamp: 42,
        };
        store.set_json("smartstudy_sample", &sample).expect("set");

        assert_eq!(store.get_json::<Sample>("smartstudy_sample"), Some(sample));
    }

    #[test]
    fn malformed_json_falls_back_to_none() {
        let mut store = Store::in_memory();
        store.set("smartstudy_sample", "{not json").expect("set");

        assert!(store.get_json::<Sample>("smartstudy_sample").is_none());
    }

    #[test]
    fn counters_default_to_zero() {
        let mut store = Store::in_memory();
        assert_eq!(store.get_count("smartstudy_quizzes_count"), 0);

        store.set("smartstudy_quizzes_count", "seven").expect("set");
        assert_eq!(store.get_count("smartstudy_quizzes_count"), 0);

        store.set("smartstudy_quizzes_count", "7").expect("set");
        assert_eq!(store.get_count("smartstudy_quizzes_count"), 7);
    }

    #[test]
    fn values_survive_reopen() {
        let temp_dir = tempdir().expect("create temp dir");

        {
            let (mut store, warning) = Store::open_in(temp_dir.path());
            assert!(warning.is_none());
            store.set(keys::THEME, "light").expect("set");
        }

        let (store, warning) = Store::open_in(temp_dir.path());
        assert!(warning.is_none());
        assert_eq!(store.get(keys::THEME), Some("light"));
    }

    #[test]
    fn open_creates_nested_directories_on_first_write() {
        let temp_dir = tempdir().expect("create temp dir");
        let nested = temp_dir.path().join("nested").join("deeply");

        let (mut store, _) = Store::open_in(&nested);
        store.set(keys::USER, "Grace").expect("set");

        assert!(nested.join(STORE_FILE).exists());
    }

    #[test]
    fn corrupted_file_opens_empty_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        fs::write(temp_dir.path().join(STORE_FILE), "not valid cbor data").expect("write");

        let (store, warning) = Store::open_in(temp_dir.path());
        assert!(warning.is_some());
        assert_eq!(store.keys().count(), 0);
    }

    #[test]
    fn remove_deletes_key() {
        let mut store = Store::in_memory();
        store.set(keys::USER, "Ada").expect("set");
        store.remove(keys::USER).expect("remove");
        store.remove(keys::USER).expect("second remove is a no-op");

        assert!(store.get(keys::USER).is_none());
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn failed_write_is_not_counted() {
        let temp_dir = tempdir().expect("create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "a regular file").expect("write");

        let (mut store, _) = Store::open_in(&blocker.join("data"));
        assert!(store.set(keys::USER, "Ada").is_err());

        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get(keys::USER), Some("Ada"));
    }
}
