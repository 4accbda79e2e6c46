// SPDX-License-Identifier: MPL-2.0
use smartstudy::activity::ActivityLog;
use smartstudy::autosave::{load_draft, Autosaver};
use smartstudy::config::{self, Config};
use smartstudy::forms::FormId;
use smartstudy::session::Session;
use smartstudy::storage::{keys, Store};
use smartstudy::text::extract_keywords;
use smartstudy::ui::notifications::{Kind, Manager};
use smartstudy::ui::theming::ThemeMode;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn activity_history_is_capped_newest_first() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let (mut store, warning) = Store::open_in(dir.path());
    assert!(warning.is_none());

    let mut log = ActivityLog::with_capacity(100);
    let now = chrono::Utc::now();
    for i in 0..150 {
        log.log(&mut store, "quizzes", format!("entry {i}"), "Student", now)
            .expect("Failed to log activity");
    }

    // Reopen from disk to check what was actually persisted.
    let (reopened, _) = Store::open_in(dir.path());
    let stored = ActivityLog::load(&reopened, 100);
    assert_eq!(stored.len(), 100);

    let details: Vec<&str> = stored.iter().map(|a| a.details.as_str()).collect();
    assert_eq!(details.first(), Some(&"entry 149"));
    assert_eq!(details.last(), Some(&"entry 50"));

    let mut ids: Vec<i64> = stored.iter().map(|a| a.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 100, "activity ids must be unique");
}

#[test]
fn theme_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let start = Instant::now();

    {
        let (store, _) = Store::open_in(dir.path());
        let mut session = Session::new(Config::default(), store, start);
        assert_eq!(session.theme(), ThemeMode::Dark);
        assert_eq!(session.toggle_theme(start), ThemeMode::Light);
    }

    let (store, _) = Store::open_in(dir.path());
    let session = Session::new(Config::default(), store, start);
    assert_eq!(session.theme(), ThemeMode::Light);
    assert_eq!(
        session.activity().iter().next().map(|a| a.details.as_str()),
        Some("Switched to light mode")
    );
}

#[test]
fn burst_of_edits_writes_one_draft() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let (mut store, _) = Store::open_in(dir.path());
    let mut autosaver = Autosaver::new(ms(2000));
    let form = FormId::default();
    let start = Instant::now();

    for (i, offset) in [0, 450, 900, 1400, 1900].into_iter().enumerate() {
        autosaver.on_input(&form, format!("version {i}"), start + ms(offset));
        let report = autosaver.tick(&mut store, start + ms(offset), chrono::Utc::now());
        assert!(report.saved.is_empty());
    }
    assert_eq!(store.write_count(), 0);

    let report = autosaver.tick(&mut store, start + ms(3900), chrono::Utc::now());
    assert_eq!(report.saved, vec![form.clone()]);
    assert!(report.failed.is_empty());
    assert_eq!(store.write_count(), 1);

    let (reopened, _) = Store::open_in(dir.path());
    assert_eq!(load_draft(&reopened, &form), "version 4");
    assert!(reopened.get(&keys::draft("default")).is_some());
}

#[test]
fn draft_saved_toast_dismissed_immediately_leaves_nothing() {
    let mut manager = Manager::default();
    let start = Instant::now();

    let id = manager.show("Draft saved", Kind::Info, Some(ms(2000)), start);
    assert!(manager.dismiss(id, start));

    manager.tick(start + ms(300));
    assert_eq!(manager.visible_count(), 0);

    // The cancelled auto-dismiss must not fire a second removal.
    manager.tick(start + ms(2000));
    assert_eq!(manager.visible_count(), 0);
    assert!(!manager.has_pending_timers());
}

#[test]
fn dismissing_twice_equals_dismissing_once() {
    let start = Instant::now();
    let mut once = Manager::default();
    let mut twice = Manager::default();

    let a = once.show("hello", Kind::Warning, None, start);
    let b = twice.show("hello", Kind::Warning, None, start);
    once.dismiss(a, start + ms(10));
    twice.dismiss(b, start + ms(10));
    twice.dismiss(b, start + ms(20));

    assert_eq!(once.pending_timers(), twice.pending_timers());
    once.tick(start + ms(310));
    twice.tick(start + ms(310));
    assert_eq!(once.visible_count(), twice.visible_count());
}

#[test]
fn keywords_follow_frequency_then_first_seen() {
    assert_eq!(
        extract_keywords("the quick brown fox jumps over the lazy dog quick quick", 3),
        vec!["quick", "brown", "fox"]
    );
}

#[test]
fn config_round_trip_through_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.default_user = Some("Ada".to_string());
    config.autosave.delay_ms = Some(1500);
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded.default_user(), "Ada");
    assert_eq!(loaded.autosave_delay(), ms(1500));

    let (store, _) = Store::open_in(dir.path());
    let session = Session::new(loaded, store, Instant::now());
    assert_eq!(session.user(), "Ada");
}
