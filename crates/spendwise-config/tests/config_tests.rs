use std::fs;

use rust_decimal_macros::dec;
use spendwise_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency_symbol.is_empty());
    assert_eq!(cfg.initial_balance, dec!(5000));
    assert_eq!(cfg.top_expenses, 5);
}

#[test]
fn missing_or_blank_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));
    assert_eq!(manager.load().expect("load missing"), Config::default());

    fs::write(manager.config_path(), "  \n").expect("write blank");
    assert_eq!(manager.load().expect("load blank"), Config::default());
}

#[test]
fn for_home_touches_nothing_until_saved() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path());

    assert!(manager.config_path().ends_with("config/config.json"));
    manager.load().expect("load defaults");
    assert!(!dir.path().join("config").exists());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path());

    let mut cfg = Config::default();
    cfg.currency_symbol = "$".to_string();
    cfg.top_expenses = 3;
    cfg.initial_balance = dec!(750);

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config").join("config.json.tmp").exists());
}

#[test]
fn hand_edited_values_out_of_range_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));
    fs::write(manager.config_path(), r#"{"top_expenses": 0}"#).expect("write config");

    assert!(matches!(
        manager.load(),
        Err(ConfigError::InvalidValue { key, .. }) if key == "top_expenses"
    ));
}

#[test]
fn invalid_config_is_never_written() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path());
    let cfg = Config {
        currency_symbol: " ".to_string(),
        ..Config::default()
    };

    assert!(manager.save(&cfg).is_err());
    assert!(!manager.config_path().exists());
}
