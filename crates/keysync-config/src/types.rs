//! Core configuration types

use std::path::PathBuf;

use keysync_keybinds::{BackupManager, SourceConfig, DEFAULT_FILE_PATTERN};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Name of the active keybindings file inside the user directory
pub const KEYBINDINGS_FILE_NAME: &str = "keybindings.json";

/// Keybinding merge configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManagerConfig {
    /// Fragment files merged first, in priority order
    pub files: Vec<String>,
    /// Folder scanned for fragments; empty when unused
    pub folder: String,
    /// Glob applied inside `folder`
    pub file_pattern: String,
    /// Sync when an external watcher reports a change
    pub auto_sync: bool,
    /// Editor user directory; relative sources resolve against it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_dir: Option<PathBuf>,
    /// Active keybindings file, `<user_dir>/keybindings.json` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Where backups go, the user directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
    /// Timestamped backups to keep; unlimited when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_retention: Option<usize>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            folder: String::new(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            auto_sync: true,
            user_dir: None,
            output: None,
            backup_dir: None,
            backup_retention: None,
        }
    }
}

impl ManagerConfig {
    /// Editor user directory, explicit or the platform default
    pub fn user_dir(&self) -> PathBuf {
        self.user_dir.clone().unwrap_or_else(default_user_dir)
    }

    /// Path of the active keybindings file
    pub fn keybindings_path(&self) -> PathBuf {
        match &self.output {
            Some(output) if output.is_absolute() => output.clone(),
            Some(output) => self.user_dir().join(output),
            None => self.user_dir().join(KEYBINDINGS_FILE_NAME),
        }
    }

    pub fn backup_dir(&self) -> PathBuf {
        match &self.backup_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.user_dir().join(dir),
            None => self.user_dir(),
        }
    }

    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(self.backup_dir()).with_retention(self.backup_retention)
    }

    /// Merge sources as the keybinds crate sees them
    pub fn source_config(&self) -> SourceConfig {
        let mut sources = SourceConfig::new(self.user_dir())
            .with_files(self.files.iter().cloned())
            .with_pattern(self.file_pattern.clone());
        if !self.folder.trim().is_empty() {
            sources = sources.with_folder(self.folder.clone());
        }
        sources
    }

    /// Append `entry` to `files` unless it is already listed
    pub fn add_file(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.files.contains(&entry) {
            return false;
        }
        self.files.push(entry);
        true
    }

    /// Drop `entry` from `files`
    pub fn remove_file(&mut self, entry: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f != entry);
        self.files.len() != before
    }

    /// Forget all configured sources
    pub fn reset_sources(&mut self) {
        self.files.clear();
        self.folder.clear();
    }

    /// Names accepted by [`ManagerConfig::set_value`]
    pub const SETTABLE_KEYS: &'static [&'static str] = &[
        "folder",
        "file_pattern",
        "auto_sync",
        "user_dir",
        "output",
        "backup_dir",
        "backup_retention",
    ];

    /// Set a scalar setting from its text form; an empty value clears
    /// optional settings
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "folder" => self.folder = value.to_string(),
            "file_pattern" => {
                self.file_pattern = if value.is_empty() {
                    DEFAULT_FILE_PATTERN.to_string()
                } else {
                    value.to_string()
                }
            }
            "auto_sync" => {
                self.auto_sync = value.parse().map_err(|_| {
                    ConfigError::Validation(format!("auto_sync must be true or false, got '{}'", value))
                })?
            }
            "user_dir" => self.user_dir = optional_path(value),
            "output" => self.output = optional_path(value),
            "backup_dir" => self.backup_dir = optional_path(value),
            "backup_retention" => {
                self.backup_retention = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        ConfigError::Validation(format!(
                            "backup_retention must be a whole number, got '{}'",
                            value
                        ))
                    })?)
                }
            }
            other => {
                return Err(ConfigError::Validation(format!(
                    "Unknown setting '{}' (expected one of: {})",
                    other,
                    Self::SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}

/// `<config_dir>/Code/User`, the editor's per-user settings directory
pub fn default_user_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Code")
        .join("User")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert!(config.files.is_empty());
        assert!(config.folder.is_empty());
        assert_eq!(config.file_pattern, "*.jsonc");
        assert!(config.auto_sync);
    }

    #[test]
    fn test_paths_follow_user_dir() {
        let config = ManagerConfig {
            user_dir: Some(PathBuf::from("/home/u/User")),
            ..Default::default()
        };
        assert_eq!(
            config.keybindings_path(),
            PathBuf::from("/home/u/User/keybindings.json")
        );
        assert_eq!(config.backup_dir(), PathBuf::from("/home/u/User"));

        let config = ManagerConfig {
            output: Some(PathBuf::from("custom.json")),
            backup_dir: Some(PathBuf::from("/var/backups")),
            ..config
        };
        assert_eq!(config.keybindings_path(), PathBuf::from("/home/u/User/custom.json"));
        assert_eq!(config.backup_dir(), PathBuf::from("/var/backups"));
    }

    #[test]
    fn test_source_config_skips_blank_folder() {
        let config = ManagerConfig {
            user_dir: Some(PathBuf::from("/u")),
            files: vec!["a.json".into()],
            folder: "  ".into(),
            ..Default::default()
        };
        let sources = config.source_config();
        assert_eq!(sources.explicit_files, vec!["a.json".to_string()]);
        assert_eq!(sources.folder(), None);
        assert_eq!(sources.base_dir, PathBuf::from("/u"));
    }

    #[test]
    fn test_add_file_and_reset() {
        let mut config = ManagerConfig::default();
        assert!(config.add_file("a.json"));
        assert!(!config.add_file("a.json"));
        assert!(config.add_file("b.json"));
        assert!(config.remove_file("b.json"));
        assert!(!config.remove_file("b.json"));
        config.folder = "kb".into();

        config.reset_sources();
        assert!(config.files.is_empty());
        assert!(config.folder.is_empty());
    }

    #[test]
    fn test_set_value() {
        let mut config = ManagerConfig::default();
        config.set_value("folder", " kb ").unwrap();
        config.set_value("auto_sync", "false").unwrap();
        config.set_value("backup_retention", "3").unwrap();
        config.set_value("output", "/tmp/out.json").unwrap();
        assert_eq!(config.folder, "kb");
        assert!(!config.auto_sync);
        assert_eq!(config.backup_retention, Some(3));
        assert_eq!(config.output, Some(PathBuf::from("/tmp/out.json")));

        config.set_value("output", "").unwrap();
        config.set_value("file_pattern", "").unwrap();
        assert_eq!(config.output, None);
        assert_eq!(config.file_pattern, "*.jsonc");

        assert!(config.set_value("auto_sync", "maybe").is_err());
        assert!(config.set_value("backup_retention", "-1").is_err());
        assert!(config.set_value("files", "a.json").is_err());
    }
}
