//! Tests for configuration loading and defaults
//!
//! Tests the config system including:
//! - Config defaults
//! - Partial and full parsing
//! - Save/load round trips
//! - Error reporting for malformed files

use crate::config::{Config, Directories};
use crate::{DeletePolicy, Error};
use chip_types::Theme;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.theme(), Theme::Light);
    assert!(!config.behavior.delete_when_disabled);
    assert_eq!(config.delete_policy(), DeletePolicy::SuppressWhenDisabled);
}

#[test]
fn test_config_parse_minimal() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_parse_partial() {
    let json = r#"{ "appearance": { "theme": "dark" } }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.theme(), Theme::Dark);
    assert!(!config.behavior.delete_when_disabled);
}

#[test]
fn test_config_parse_full() {
    let json = r#"{
        "appearance": { "theme": "Dark" },
        "behavior": { "deleteWhenDisabled": true }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.theme(), Theme::Dark);
    assert_eq!(config.delete_policy(), DeletePolicy::AlwaysActive);
}

#[test]
fn test_config_rejects_unknown_theme() {
    let json = r#"{ "appearance": { "theme": "sepia" } }"#;
    let err = serde_json::from_str::<Config>(json).unwrap_err();
    assert!(err.to_string().contains("sepia"));
}

#[test]
fn test_config_unknown_fields_are_tolerated() {
    let json = r#"{ "appearance": { "theme": "light", "accent": "blue" }, "extra": 1 }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.theme(), Theme::Light);
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.json");

    let config = Config::load(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_malformed_file_is_json_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ \"appearance\": ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = Directories::with_base(temp_dir.path().join("chip"));
    dirs.ensure_exists().unwrap();

    let mut config = Config::default();
    config.appearance.theme = Theme::Dark;
    config.behavior.delete_when_disabled = true;
    config.save(&dirs.config_file).unwrap();

    let content = std::fs::read_to_string(&dirs.config_file).unwrap();
    assert!(content.contains("\"theme\": \"dark\""));
    assert!(content.contains("\"deleteWhenDisabled\": true"));

    let loaded = Config::load(&dirs.config_file).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_save_into_missing_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("config.json");

    let err = Config::default().save(&path).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
