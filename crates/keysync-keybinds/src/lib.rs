//! Keybinding fragment merging
//!
//! This crate turns a set of JSON-with-comments keybinding fragments into a
//! single active keybindings file:
//! - JSONC comment and trailing-comma stripping
//! - Binding record validation and normalization
//! - Source resolution from explicit files and a scanned folder
//! - Deterministic, first-wins deduplicating merge
//! - Atomic output writing, backups and folder setup workflows

pub mod backup;
pub mod error;
pub mod fragment;
pub mod init;
pub mod jsonc;
pub mod merge;
pub mod models;
pub mod persistence;
pub mod prompt;
pub mod reader;
pub mod resolver;
pub mod sync;
pub mod validate;

// Re-export public types
pub use backup::{BackupEntry, BackupManager, ORIGINAL_BACKUP_NAME};
pub use error::{BackupError, PersistenceError, WorkflowError};
pub use fragment::{create_fragment, FragmentOutcome};
pub use init::{Initializer, MigrationOutcome, SetupOutcome, MAIN_FRAGMENT_NAME};
pub use merge::{KeybindMerger, MergeResult};
pub use models::{BindingRecord, IdentityKey, SourceConfig, DEFAULT_FILE_PATTERN};
pub use persistence::{render_keybindings, write_keybindings};
pub use prompt::{AutoPrompter, Prompter};
pub use reader::{read_source, SourceRead, SourceWarning, WarningReason};
pub use resolver::SourceResolver;
pub use sync::{SyncOutcome, SyncReport, SyncService};
pub use validate::validate;
