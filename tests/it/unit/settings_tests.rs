//! Unit tests for editor settings persistence.

use sitecanvas::SettingsError;
use sitecanvas::input::Key;
use sitecanvas::settings::{EditorSettings, default_settings_path};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = EditorSettings::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(settings, EditorSettings::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let settings = EditorSettings {
        grid_size: 16.0,
        snap_to_grid: false,
        pan_key: Key::Character('h'),
        pinned_last_types: vec!["footer".into(), "legal".into()],
        ..EditorSettings::default()
    };
    settings.save_to(&path).unwrap();

    let loaded = EditorSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
    // No temp files left behind
    assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ grid_size: ").unwrap();
    assert!(matches!(EditorSettings::load_from(&path), Err(SettingsError::Json(_))));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"theme": "dark", "max_history": 5}"#).unwrap();
    let settings = EditorSettings::load_from(&path).unwrap();
    assert_eq!(settings.max_history, 5);
    assert!(settings.snap_to_grid);
}

#[test]
fn test_derived_configs() {
    let settings = EditorSettings {
        grid_size: 12.0,
        pinned_first_types: vec!["banner".into()],
        ..EditorSettings::default()
    };
    assert_eq!(settings.grid().size, 12.0);
    assert!(settings.placement_rules().is_pinned_first("banner"));
    assert!(!settings.placement_rules().is_pinned_first("navbar"));
}

#[test]
fn test_default_path_shape() {
    if let Some(path) = default_settings_path() {
        assert!(path.ends_with("sitecanvas/settings.json"));
    }
}
