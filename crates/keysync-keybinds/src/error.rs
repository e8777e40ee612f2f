//! Error types for keybinding operations
//!
//! Per-source problems never surface as errors: they are collected as
//! [`SourceWarning`](crate::reader::SourceWarning)s on the merge result.
//! The types here cover the operations that are allowed to fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing the active keybindings file
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur in the backup facility
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Backup not found: {0}")]
    NotFound(String),

    #[error("Original keybindings backup not found: {0}")]
    OriginalNotFound(PathBuf),

    #[error("Invalid backup name: {0}")]
    InvalidName(String),

    #[error("Backup failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors raised by the higher level sync, setup and fragment workflows
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Keybindings folder is not configured")]
    FolderNotConfigured,

    #[error("Invalid fragment file name: {0}")]
    InvalidFileName(String),

    #[error("Folder path must not be empty")]
    EmptyFolderPath,

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
