// CLI error types and user-facing messages

use keysync_config::ConfigError;
use keysync_keybinds::{BackupError, PersistenceError, WorkflowError};
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Keybindings folder is not configured")]
    FolderNotConfigured,

    #[error("Write error: {0}")]
    Write(String),

    #[error("Backup error: {0}")]
    Backup(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'keysync --help' for usage information.", message)
            }
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::Config(msg) => {
                format!("Configuration error: {}\n\nRun 'keysync config' to check your configuration.", msg)
            }
            CliError::FolderNotConfigured => {
                "No keybindings folder is configured.\n\nRun 'keysync setup' to create one.".to_string()
            }
            CliError::Write(msg) => {
                format!("Could not write keybindings: {}\n\nThe previous file was left untouched.", msg)
            }
            CliError::Backup(msg) => {
                format!("Backup error: {}\n\nRun 'keysync restore' to see available backups.", msg)
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}

impl From<PersistenceError> for CliError {
    fn from(err: PersistenceError) -> Self {
        CliError::Write(err.to_string())
    }
}

impl From<BackupError> for CliError {
    fn from(err: BackupError) -> Self {
        CliError::Backup(err.to_string())
    }
}

impl From<WorkflowError> for CliError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::FolderNotConfigured => CliError::FolderNotConfigured,
            WorkflowError::InvalidFileName(name) => CliError::InvalidArgument {
                message: format!(
                    "'{}' is not a valid file name (letters, digits, '.', '-' and '_' only)",
                    name
                ),
            },
            WorkflowError::EmptyFolderPath => CliError::InvalidArgument {
                message: "folder path must not be empty".to_string(),
            },
            WorkflowError::Persistence(e) => e.into(),
            WorkflowError::Backup(e) => e.into(),
            WorkflowError::IoError(e) => CliError::Io(e),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
