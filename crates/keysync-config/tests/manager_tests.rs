use std::path::PathBuf;

use keysync_config::*;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("config.toml"))
        .with_env_prefix("KEYSYNC_TEST_MISSING");

    let config = manager.load_config().unwrap();
    assert_eq!(config, ManagerConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("nested/config.toml"))
        .with_env_prefix("KEYSYNC_TEST_ROUNDTRIP");

    let config = ManagerConfig {
        files: vec!["base.json".into(), "extra.jsonc".into()],
        folder: "keybindings".into(),
        file_pattern: "keys-*.jsonc".into(),
        auto_sync: false,
        user_dir: Some(PathBuf::from("/home/u/.config/Code/User")),
        output: None,
        backup_dir: None,
        backup_retention: Some(5),
    };
    manager.save_config(&config).unwrap();

    assert_eq!(manager.load_config().unwrap(), config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "folder = \"kb\"\n").unwrap();

    let config = ConfigManager::with_path(path)
        .with_env_prefix("KEYSYNC_TEST_PARTIAL")
        .load_config()
        .unwrap();
    assert_eq!(config.folder, "kb");
    assert_eq!(config.file_pattern, "*.jsonc");
    assert!(config.auto_sync);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "folder = [unclosed").unwrap();

    let result = ConfigManager::with_path(path)
        .with_env_prefix("KEYSYNC_TEST_MALFORMED")
        .load_config();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "folder = \"from-file\"\nauto_sync = true\n").unwrap();

    std::env::set_var("KEYSYNC_TEST_ENV_FOLDER", "from-env");
    std::env::set_var("KEYSYNC_TEST_ENV_AUTO_SYNC", "false");
    std::env::set_var("KEYSYNC_TEST_ENV_FILES", "a.json,b.jsonc");

    let config = ConfigManager::with_path(path)
        .with_env_prefix("KEYSYNC_TEST_ENV")
        .load_config()
        .unwrap();

    assert_eq!(config.folder, "from-env");
    assert!(!config.auto_sync);
    assert_eq!(config.files, vec!["a.json".to_string(), "b.jsonc".to_string()]);
}

#[test]
fn test_validation() {
    let manager = ConfigManager::with_path(PathBuf::from("unused.toml"));
    assert!(manager.validate_config(&ManagerConfig::default()).is_ok());

    let bad_pattern = ManagerConfig {
        file_pattern: "[".into(),
        ..Default::default()
    };
    assert!(matches!(
        manager.validate_config(&bad_pattern),
        Err(ConfigError::Validation(_))
    ));

    let empty_pattern = ManagerConfig {
        file_pattern: " ".into(),
        ..Default::default()
    };
    assert!(manager.validate_config(&empty_pattern).is_err());

    let zero_retention = ManagerConfig {
        backup_retention: Some(0),
        ..Default::default()
    };
    assert!(manager.validate_config(&zero_retention).is_err());
}

#[test]
fn test_default_path_location() {
    let path = ConfigManager::default_config_path();
    assert!(path.ends_with("keysync/config.toml"));
}
