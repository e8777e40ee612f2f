//! Backup management for the active keybindings file
//!
//! Two kinds of backups live in the backup directory:
//! - timestamped copies, `keybindings-backup-YYYY-MM-DD_HH-MM-SS.json`,
//!   taken before a sync overwrites the active file;
//! - the original backup, `keybindings-backup.json`, taken once when an
//!   existing keybindings file is first brought under management.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use tokio::fs;
use tracing::{debug, info};

use crate::error::BackupError;

/// File name of the one-time backup of the user's original keybindings
pub const ORIGINAL_BACKUP_NAME: &str = "keybindings-backup.json";

const TIMESTAMPED_PREFIX: &str = "keybindings-backup-";
const BACKUP_EXTENSION: &str = ".json";

/// A backup file found in the backup directory
#[derive(Debug, Clone, PartialEq)]
pub struct BackupEntry {
    pub name: String,
    pub path: PathBuf,
    pub modified: Option<DateTime<Local>>,
    /// Whether this is the original keybindings backup
    pub original: bool,
}

/// Creates, lists and restores keybindings backups
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: Option<usize>,
}

impl BackupManager {
    /// Creates a new BackupManager storing backups in `backup_dir`
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        BackupManager {
            backup_dir: backup_dir.into(),
            retention: None,
        }
    }

    /// Keep at most `count` timestamped backups; the original is never pruned
    pub fn with_retention(mut self, count: Option<usize>) -> Self {
        self.retention = count;
        self
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn original_path(&self) -> PathBuf {
        self.backup_dir.join(ORIGINAL_BACKUP_NAME)
    }

    /// Copy `target` to a new timestamped backup
    ///
    /// A missing target produces a backup containing an empty list.
    pub async fn create_backup(&self, target: &Path) -> Result<PathBuf, BackupError> {
        fs::create_dir_all(&self.backup_dir).await.map_err(|e| {
            BackupError::Failed(format!("Failed to create backup directory: {}", e))
        })?;

        let backup_path = self.next_backup_path(Utc::now()).await;

        if fs::try_exists(target).await.unwrap_or(false) {
            fs::copy(target, &backup_path).await.map_err(|e| {
                BackupError::Failed(format!("Failed to copy {}: {}", target.display(), e))
            })?;
        } else {
            fs::write(&backup_path, "[]\n").await.map_err(|e| {
                BackupError::Failed(format!("Failed to write backup file: {}", e))
            })?;
        }

        info!("Backed up {} to {}", target.display(), backup_path.display());
        self.enforce_retention().await?;
        Ok(backup_path)
    }

    async fn next_backup_path(&self, now: DateTime<Utc>) -> PathBuf {
        let stamp = now.format("%Y-%m-%d_%H-%M-%S").to_string();
        let mut candidate = self.timestamped_path(&stamp);
        let mut counter = 1;
        while fs::try_exists(&candidate).await.unwrap_or(false) {
            candidate = self.timestamped_path(&format!("{}-{:02}", stamp, counter));
            counter += 1;
        }
        candidate
    }

    fn timestamped_path(&self, stamp: &str) -> PathBuf {
        self.backup_dir
            .join(format!("{}{}{}", TIMESTAMPED_PREFIX, stamp, BACKUP_EXTENSION))
    }

    /// Save `source` as the original backup unless one already exists
    ///
    /// Returns the original backup path and whether it was written now.
    pub async fn save_original(&self, source: &Path) -> Result<(PathBuf, bool), BackupError> {
        let original = self.original_path();
        if fs::try_exists(&original).await.unwrap_or(false) {
            debug!("Original backup already present at {}", original.display());
            return Ok((original, false));
        }

        fs::create_dir_all(&self.backup_dir).await?;
        fs::copy(source, &original).await?;
        info!("Saved original keybindings to {}", original.display());
        Ok((original, true))
    }

    /// All backups: the original first, then timestamped ones newest first
    pub async fn list_backups(&self) -> Result<Vec<BackupEntry>, BackupError> {
        if !fs::try_exists(&self.backup_dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut original = None;
        let mut timestamped = Vec::new();

        let mut entries = fs::read_dir(&self.backup_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let is_original = name == ORIGINAL_BACKUP_NAME;
            if !is_original && !is_timestamped_name(&name) {
                continue;
            }

            let modified = entry
                .metadata()
                .await
                .ok()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Local>::from);

            let backup = BackupEntry {
                path: entry.path(),
                name,
                modified,
                original: is_original,
            };
            if is_original {
                original = Some(backup);
            } else {
                timestamped.push(backup);
            }
        }

        timestamped.sort_by(|a, b| backup_stem(&b.name).cmp(backup_stem(&a.name)));
        Ok(original.into_iter().chain(timestamped).collect())
    }

    /// Copy the named backup over `target`
    pub async fn restore(&self, name: &str, target: &Path) -> Result<PathBuf, BackupError> {
        if name.contains(['/', '\\']) || !(name == ORIGINAL_BACKUP_NAME || is_timestamped_name(name)) {
            return Err(BackupError::InvalidName(name.to_string()));
        }

        let source = self.backup_dir.join(name);
        if !fs::try_exists(&source).await.unwrap_or(false) {
            return Err(BackupError::NotFound(name.to_string()));
        }

        copy_over(&source, target).await?;
        info!("Restored {} from {}", target.display(), source.display());
        Ok(source)
    }

    /// Copy the original backup over `target`
    pub async fn restore_original(&self, target: &Path) -> Result<PathBuf, BackupError> {
        let source = self.original_path();
        if !fs::try_exists(&source).await.unwrap_or(false) {
            return Err(BackupError::OriginalNotFound(source));
        }
        copy_over(&source, target).await?;
        info!("Restored original keybindings to {}", target.display());
        Ok(source)
    }

    async fn enforce_retention(&self) -> Result<(), BackupError> {
        let Some(keep) = self.retention else {
            return Ok(());
        };

        let stale: Vec<BackupEntry> = self
            .list_backups()
            .await?
            .into_iter()
            .filter(|b| !b.original)
            .skip(keep)
            .collect();

        for backup in stale {
            debug!("Removing old backup {}", backup.path.display());
            fs::remove_file(&backup.path).await?;
        }
        Ok(())
    }
}

async fn copy_over(source: &Path, target: &Path) -> Result<(), BackupError> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::copy(source, target).await?;
    Ok(())
}

fn is_timestamped_name(name: &str) -> bool {
    name.starts_with(TIMESTAMPED_PREFIX) && name.ends_with(BACKUP_EXTENSION)
}

// Sorting on the stem keeps "..._12-00-00-01" after "..._12-00-00".
fn backup_stem(name: &str) -> &str {
    name.strip_suffix(BACKUP_EXTENSION).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_name_recognition() {
        assert!(is_timestamped_name("keybindings-backup-2024-01-02_03-04-05.json"));
        assert!(!is_timestamped_name(ORIGINAL_BACKUP_NAME));
        assert!(!is_timestamped_name("keybindings.json"));
    }

    #[test]
    fn test_collision_suffix_sorts_newer() {
        let mut names = vec![
            "keybindings-backup-2024-01-02_03-04-05.json",
            "keybindings-backup-2024-01-02_03-04-05-01.json",
        ];
        names.sort_by(|a, b| backup_stem(b).cmp(backup_stem(a)));
        assert_eq!(names[0], "keybindings-backup-2024-01-02_03-04-05-01.json");
    }

    #[tokio::test]
    async fn test_create_backup_of_missing_file_writes_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let manager = BackupManager::new(dir.path());

        let path = manager
            .create_backup(&dir.path().join("keybindings.json"))
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]\n");
    }

    #[tokio::test]
    async fn test_backups_in_same_second_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("keybindings.json");
        std::fs::write(&target, "[]").unwrap();
        let manager = BackupManager::new(dir.path().join("backups"));

        let now = Utc::now();
        let first = manager.next_backup_path(now).await;
        std::fs::create_dir_all(manager.backup_dir()).unwrap();
        std::fs::write(&first, "[]").unwrap();
        let second = manager.next_backup_path(now).await;

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_restore_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        let manager = BackupManager::new(dir.path());
        let result = manager
            .restore("../keybindings-backup-x.json", &dir.path().join("out.json"))
            .await;
        assert!(matches!(result, Err(BackupError::InvalidName(_))));
    }
}
