// Command handlers for the keysync CLI

pub mod backup;
pub mod config;
pub mod new;
pub mod on_change;
pub mod setup;
pub mod sources;
pub mod sync;

pub use backup::{BackupCommand, RestoreCommand, RestoreOriginalCommand};
pub use config::{ConfigAction, ConfigCommand};
pub use new::NewCommand;
pub use on_change::OnChangeCommand;
pub use setup::{ResetCommand, SetupCommand};
pub use sources::SourcesCommand;
pub use sync::{MergeFolderCommand, SyncCommand};

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
