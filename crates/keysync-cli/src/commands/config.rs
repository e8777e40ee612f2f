// Configuration management

use async_trait::async_trait;

use super::Command;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::{print_info, print_success, print_warning, OutputStyle};

/// Manage configuration
pub struct ConfigCommand {
    ctx: AppContext,
    pub action: ConfigAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    Show,
    Path,
    Set(String, String),
    AddFile(String),
    RemoveFile(String),
}

impl ConfigCommand {
    pub fn new(ctx: AppContext, action: ConfigAction) -> Self {
        Self { ctx, action }
    }

    /// Display the effective configuration
    fn show_config(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let config = self.ctx.config();

        println!("{}", style.header("keysync configuration"));
        println!();

        let files = if config.files.is_empty() {
            "(none)".to_string()
        } else {
            config.files.join(", ")
        };
        let folder = if config.folder.trim().is_empty() {
            "(not set)".to_string()
        } else {
            config.folder.clone()
        };
        let retention = config
            .backup_retention
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unlimited".to_string());

        println!("{}", style.setting("files", &files));
        println!("{}", style.setting("folder", &folder));
        println!("{}", style.setting("file_pattern", &config.file_pattern));
        println!("{}", style.setting("auto_sync", &config.auto_sync.to_string()));
        println!(
            "{}",
            style.setting("user_dir", &config.user_dir().display().to_string())
        );
        println!(
            "{}",
            style.setting("output", &config.keybindings_path().display().to_string())
        );
        println!(
            "{}",
            style.setting("backup_dir", &config.backup_dir().display().to_string())
        );
        println!("{}", style.setting("backup_retention", &retention));

        println!();
        println!(
            "{}",
            style.info(&format!(
                "Config file: {}",
                self.ctx.manager().config_path().display()
            ))
        );
        Ok(())
    }

    fn set_config(&self, key: &str, value: &str) -> CliResult<()> {
        self.ctx
            .try_update_config(|c| c.set_value(key, value).map_err(Into::into))?;
        print_success(&format!("Set {} = {}", key, value));
        Ok(())
    }

    fn add_file(&self, file: &str) -> CliResult<()> {
        let file = file.trim();
        if self.ctx.config().files.iter().any(|f| f == file) {
            print_info(&format!("{} is already in the merge list", file));
            return Ok(());
        }
        self.ctx.update_config(|c| {
            c.add_file(file);
        })?;
        print_success(&format!("Added {} to the merge list", file));
        Ok(())
    }

    fn remove_file(&self, file: &str) -> CliResult<()> {
        let file = file.trim();
        if !self.ctx.config().files.iter().any(|f| f == file) {
            print_warning(&format!("{} is not in the merge list", file));
            return Ok(());
        }
        self.ctx.update_config(|c| {
            c.remove_file(file);
        })?;
        print_success(&format!("Removed {} from the merge list", file));
        Ok(())
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        match &self.action {
            ConfigAction::Show => self.show_config(),
            ConfigAction::Path => {
                println!("{}", self.ctx.manager().config_path().display());
                Ok(())
            }
            ConfigAction::Set(key, value) => self.set_config(key, value),
            ConfigAction::AddFile(file) => self.add_file(file),
            ConfigAction::RemoveFile(file) => self.remove_file(file),
        }
    }
}
