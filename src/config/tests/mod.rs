//! Unit tests for engine configuration parsing.
//! No filesystem access except through tempfile.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::fs;

use crate::ControlBarError;
use crate::config::{DEFAULT_ICON_BASE_PATH, EngineConfig, LogLevel};

#[test]
fn defaults_when_empty() {
    let config = EngineConfig::from_toml_str("").unwrap();

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.icon_base_path, DEFAULT_ICON_BASE_PATH);
    assert!(!config.log);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn parses_all_fields() {
    let config = EngineConfig::from_toml_str(
        r#"
icon_base_path = "/static/player/icons/"
log = true
log_level = "debug"
"#,
    )
    .unwrap();

    assert_eq!(config.icon_base_path, "/static/player/icons/");
    assert!(config.log);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn appends_missing_separator() {
    let config = EngineConfig::from_toml_str(r#"icon_base_path = "/icons""#).unwrap();
    assert_eq!(config.icon_base_path, "/icons/");

    let config = EngineConfig::default().with_icon_base_path("cdn/icons");
    assert_eq!(config.icon_base_path, "cdn/icons/");
}

#[test]
fn rejects_blank_base_path() {
    let error = EngineConfig::from_toml_str(r#"icon_base_path = "  ""#).unwrap_err();
    assert!(matches!(
        error,
        ControlBarError::InvalidConfigField { ref field, .. } if field == "icon_base_path"
    ));
}

#[test]
fn rejects_unknown_log_level() {
    let error = EngineConfig::from_toml_str(r#"log_level = "chatty""#).unwrap_err();
    match error {
        ControlBarError::TomlParse { location, .. } => assert_eq!(location, "string"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loads_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("controlbar.toml");
    fs::write(&path, "log = true\n").unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert!(config.log);
    assert_eq!(config.icon_base_path, DEFAULT_ICON_BASE_PATH);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let error = EngineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(error, ControlBarError::IoError { .. }));
}

#[test]
fn log_level_directives() {
    assert_eq!(LogLevel::Warn.as_directive(), "warn");
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}
