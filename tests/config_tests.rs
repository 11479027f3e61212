//! Integration tests for configuration loading and saving

use std::fs;
use tempfile::TempDir;

use designer::config::{Config, ConfigManager};
use designer::form::ReorderMode;
use serde_json::json;

#[test]
fn test_missing_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = ConfigManager::new(temp_dir.path());

    manager.load().unwrap();

    assert_eq!(manager.get_config(), &Config::default());
    assert_eq!(manager.get_config().designer.reorder_mode, ReorderMode::Live);
    assert!(manager.get_config().designer.select_on_add);
    assert!(manager.get_config().ui.mouse);
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("formdesk");

    let mut manager = ConfigManager::new(&config_dir);
    manager
        .update_setting("designer.reorderMode", json!("on_drop"))
        .unwrap();
    manager.update_setting("ui.maxToasts", json!(2)).unwrap();
    manager.save().unwrap();
    assert!(manager.path().exists());

    let mut reloaded = ConfigManager::new(&config_dir);
    reloaded.load().unwrap();
    assert_eq!(reloaded.get_config().designer.reorder_mode, ReorderMode::OnDrop);
    assert_eq!(reloaded.get_config().ui.max_toasts, 2);
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.json"),
        r#"{ "ui": { "showStatusBar": false }, "log": { "level": "debug" } }"#,
    )
    .unwrap();

    let mut manager = ConfigManager::new(temp_dir.path());
    manager.load().unwrap();

    let config = manager.into_config();
    assert!(!config.ui.show_status_bar);
    assert_eq!(config.ui.toast_duration_ms, 3000);
    assert_eq!(config.log.level, "debug");
    assert!(config.designer.select_on_add);
}

#[test]
fn test_broken_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("config.json"), "{ not json").unwrap();

    let mut manager = ConfigManager::new(temp_dir.path());
    assert!(manager.load().is_err());
    assert_eq!(manager.get_config(), &Config::default());
}

#[test]
fn test_settings_by_path() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = ConfigManager::new(temp_dir.path());

    manager.update_setting("ui.mouse", json!(false)).unwrap();
    manager.update_setting("log.level", json!("warn")).unwrap();

    assert_eq!(manager.get_setting("ui.mouse").unwrap(), json!(false));
    assert_eq!(manager.get_setting("log.level").unwrap(), json!("warn"));
    assert_eq!(
        manager.get_setting("designer.reorderMode").unwrap(),
        json!("live")
    );

    assert!(manager.update_setting("ui.mouse", json!("yes")).is_err());
    assert!(manager.update_setting("designer.reorderMode", json!("sideways")).is_err());
    assert!(manager.get_setting("editor.tabSize").is_err());
}
