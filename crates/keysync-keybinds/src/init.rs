//! Keybindings folder setup and migration of an existing keybindings file
//!
//! When a user starts managing fragments, the bindings they already have in
//! the active file would be overwritten by the first sync. Migration copies
//! them into the folder as `keybindings-main.jsonc`, which the default
//! pattern picks up, and keeps a one-time original backup for
//! `restore-original`.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::backup::BackupManager;
use crate::error::WorkflowError;
use crate::jsonc;
use crate::prompt::Prompter;

/// Name of the fragment created from a migrated keybindings file
pub const MAIN_FRAGMENT_NAME: &str = "keybindings-main.jsonc";

/// What happened to the existing keybindings file
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// No active file, or it holds no bindings
    NothingToMigrate,
    /// The user chose to keep the file where it is
    Declined,
    Migrated {
        main_fragment: PathBuf,
        original_backup: PathBuf,
        /// False when an earlier original backup was kept
        original_written: bool,
    },
}

/// Result of setting up a keybindings folder
#[derive(Debug, Clone, PartialEq)]
pub struct SetupOutcome {
    /// Value to store as the configured folder, as entered
    pub folder_setting: String,
    /// Absolute folder location
    pub folder: PathBuf,
    pub migration: MigrationOutcome,
}

/// Prepares the keybindings folder for a user directory
pub struct Initializer<'a> {
    user_dir: PathBuf,
    keybindings: PathBuf,
    backups: BackupManager,
    prompter: &'a dyn Prompter,
}

impl<'a> Initializer<'a> {
    pub fn new(
        user_dir: impl Into<PathBuf>,
        keybindings: impl Into<PathBuf>,
        backups: BackupManager,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Initializer {
            user_dir: user_dir.into(),
            keybindings: keybindings.into(),
            backups,
            prompter,
        }
    }

    /// Create the folder (relative paths live under the user directory) and
    /// offer to migrate the current keybindings into it
    pub async fn setup_folder(&self, folder: &str) -> Result<SetupOutcome, WorkflowError> {
        let folder_setting = folder.trim();
        if folder_setting.is_empty() {
            return Err(WorkflowError::EmptyFolderPath);
        }

        let path = Path::new(folder_setting);
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.user_dir.join(path)
        };

        fs::create_dir_all(&resolved).await?;
        info!("Keybindings folder ready at {}", resolved.display());

        let migration = self.migrate_existing(&resolved).await?;
        Ok(SetupOutcome {
            folder_setting: folder_setting.to_string(),
            folder: resolved,
            migration,
        })
    }

    /// Copy a non-empty active keybindings file into `folder`
    pub async fn migrate_existing(&self, folder: &Path) -> Result<MigrationOutcome, WorkflowError> {
        if !self.has_bindings().await {
            debug!("No existing keybindings to migrate");
            return Ok(MigrationOutcome::NothingToMigrate);
        }

        let question = format!(
            "Existing bindings found in {}. Copy them to {} in the keybindings folder?",
            self.keybindings.display(),
            MAIN_FRAGMENT_NAME
        );
        if !self.prompter.confirm(&question) {
            return Ok(MigrationOutcome::Declined);
        }

        fs::create_dir_all(folder).await?;
        let main_fragment = folder.join(MAIN_FRAGMENT_NAME);
        let overwrite = !fs::try_exists(&main_fragment).await.unwrap_or(false)
            || self.prompter.confirm(&format!(
                "{} already exists. Overwrite it?",
                main_fragment.display()
            ));
        if !overwrite {
            return Ok(MigrationOutcome::Declined);
        }

        fs::copy(&self.keybindings, &main_fragment).await?;
        let (original_backup, original_written) = self.backups.save_original(&self.keybindings).await?;

        info!("Migrated {} to {}", self.keybindings.display(), main_fragment.display());
        Ok(MigrationOutcome::Migrated {
            main_fragment,
            original_backup,
            original_written,
        })
    }

    async fn has_bindings(&self) -> bool {
        let Ok(text) = fs::read_to_string(&self.keybindings).await else {
            return false;
        };
        matches!(jsonc::parse(&text), Ok(Value::Array(items)) if !items.is_empty())
    }
}
