use std::fs;

use stepform_core::config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn load_returns_defaults_when_missing() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path()).unwrap();

    assert_eq!(manager.load().unwrap(), Config::default());
    assert_eq!(manager.config_path(), dir.path().join("config").join("config.json"));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
    let config = Config {
        locale: "de-DE".into(),
        latch_errors: false,
        quiet_mode: true,
        sessions_dir: Some(dir.path().join("elsewhere")),
        ..Config::default()
    };

    manager.save(&config).unwrap();

    assert_eq!(manager.load().unwrap(), config);
    let leftovers: Vec<_> = fs::read_dir(dir.path().join("config"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["config.json"]);
}

#[test]
fn corrupt_config_reports_serde_error() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
    fs::write(manager.config_path(), "{ locale: nope").unwrap();

    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}

#[test]
fn defaults_match_documented_values() {
    let config = Config::default();
    assert_eq!(config.locale, "en-US");
    assert!(config.latch_errors);
    assert!(config.clear_error_on_retreat);
    assert!(config.ui_color_enabled);
    assert!(!config.quiet_mode);
    assert!(config.sessions_dir.is_none());
}
