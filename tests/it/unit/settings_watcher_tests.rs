//! Unit tests for settings_watcher module.

use crate::helpers::{registered_editor, scenario_a_tree};
use sitecanvas::settings::EditorSettings;
use sitecanvas::settings_watcher::SettingsWatcher;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[test]
fn test_watcher_creation() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(&settings_path, "{}").unwrap();

    let watcher = SettingsWatcher::new(settings_path.clone());
    assert!(watcher.is_ok());
    assert_eq!(watcher.unwrap().path(), settings_path.as_path());
}

#[test]
fn test_watcher_on_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone").join("settings.json");
    assert!(SettingsWatcher::new(path).is_err());
}

#[test]
fn test_reload_without_events_is_noop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut watcher = SettingsWatcher::new(path).unwrap();
    let mut editor = registered_editor(scenario_a_tree());
    while watcher.poll().is_some() {}
    assert!(!editor.check_settings_reload(&mut watcher));
}

/// File watcher event delivery is timing-dependent and platform-specific, so
/// this is ignored by default.
#[test]
#[ignore]
fn test_file_write_triggers_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut watcher = SettingsWatcher::new(path.clone()).unwrap();
    let mut editor = registered_editor(scenario_a_tree());

    let settings = EditorSettings {
        grid_size: 10.0,
        ..EditorSettings::default()
    };
    settings.save_to(&path).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while watcher.pending() == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(20));
    }
    assert!(editor.check_settings_reload(&mut watcher));
    assert_eq!(editor.settings().grid_size, 10.0);
    assert_eq!(editor.selection().grid().size, 10.0);
}
