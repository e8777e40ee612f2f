// Backup and restore commands

use async_trait::async_trait;
use keysync_keybinds::BackupEntry;

use super::Command;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success, print_warning, OutputStyle};

/// Create a timestamped backup of the active keybindings file
pub struct BackupCommand {
    ctx: AppContext,
}

impl BackupCommand {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for BackupCommand {
    async fn execute(&self) -> CliResult<()> {
        let target = self.ctx.config().keybindings_path();
        let backup = self.ctx.config().backup_manager().create_backup(&target).await?;
        let style = OutputStyle::default();
        print_success(&format!(
            "Backed up keybindings to {}",
            style.path(&backup)
        ));
        Ok(())
    }
}

/// Restore the active keybindings file from a named or chosen backup
pub struct RestoreCommand {
    ctx: AppContext,
    name: Option<String>,
}

impl RestoreCommand {
    pub fn new(ctx: AppContext, name: Option<String>) -> Self {
        Self { ctx, name }
    }

    async fn pick_backup(&self) -> CliResult<Option<String>> {
        let backups = self.ctx.config().backup_manager().list_backups().await?;
        if backups.is_empty() {
            print_warning("No backups found");
            return Ok(None);
        }

        let labels: Vec<String> = backups.iter().map(backup_label).collect();
        let choice = self
            .ctx
            .prompter()
            .choose("Select a backup to restore", &labels);
        Ok(choice.map(|i| backups[i].name.clone()))
    }
}

#[async_trait]
impl Command for RestoreCommand {
    async fn execute(&self) -> CliResult<()> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => match self.pick_backup().await? {
                Some(name) => name,
                None => {
                    print_info("Restore cancelled");
                    return Ok(());
                }
            },
        };

        let target = self.ctx.config().keybindings_path();
        self.ctx
            .config()
            .backup_manager()
            .restore(&name, &target)
            .await?;
        print_success(&format!("Restored keybindings from {}", name));
        Ok(())
    }
}

/// Restore the bindings saved before the first migration
pub struct RestoreOriginalCommand {
    ctx: AppContext,
}

impl RestoreOriginalCommand {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for RestoreOriginalCommand {
    async fn execute(&self) -> CliResult<()> {
        let backups = self.ctx.config().backup_manager();
        if !backups.original_path().exists() {
            return Err(CliError::Backup(format!(
                "no original backup at {}",
                backups.original_path().display()
            )));
        }

        let confirmed = self
            .ctx
            .prompter()
            .confirm("Replace keybindings.json with the original bindings?");
        if !confirmed {
            print_info("Restore cancelled");
            return Ok(());
        }

        backups
            .restore_original(&self.ctx.config().keybindings_path())
            .await?;
        print_success("Restored the original keybindings");
        Ok(())
    }
}

fn backup_label(entry: &BackupEntry) -> String {
    let when = entry
        .modified
        .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown time".to_string());
    if entry.original {
        format!("{} (original, {})", entry.name, when)
    } else {
        format!("{} ({})", entry.name, when)
    }
}
