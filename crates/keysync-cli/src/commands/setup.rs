// Folder setup and reset

use async_trait::async_trait;
use keysync_keybinds::{Initializer, MigrationOutcome};

use super::Command;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success, OutputStyle};

/// Create the keybindings folder, store it and offer migration
pub struct SetupCommand {
    ctx: AppContext,
    folder: Option<String>,
}

impl SetupCommand {
    pub fn new(ctx: AppContext, folder: Option<String>) -> Self {
        Self { ctx, folder }
    }

    fn folder_setting(&self) -> CliResult<String> {
        self.folder
            .clone()
            .or_else(|| {
                self.ctx
                    .prompter()
                    .input("Keybindings folder (relative to the user directory or absolute):")
            })
            .ok_or_else(|| CliError::InvalidArgument {
                message: "no keybindings folder given".to_string(),
            })
    }
}

#[async_trait]
impl Command for SetupCommand {
    async fn execute(&self) -> CliResult<()> {
        let folder = self.folder_setting()?;
        let config = self.ctx.config();
        let keybindings = config.keybindings_path();

        let initializer = Initializer::new(
            config.user_dir(),
            &keybindings,
            config.backup_manager(),
            self.ctx.prompter(),
        );
        let outcome = initializer.setup_folder(&folder).await?;

        let folder_setting = outcome.folder_setting.clone();
        self.ctx.update_config(|c| c.folder = folder_setting)?;

        let style = OutputStyle::default();
        print_success(&format!(
            "Keybindings folder ready at {}",
            style.path(&outcome.folder)
        ));

        match outcome.migration {
            MigrationOutcome::NothingToMigrate => {}
            MigrationOutcome::Declined => {
                print_info("Existing keybindings were left in place");
            }
            MigrationOutcome::Migrated {
                main_fragment,
                original_backup,
                original_written,
            } => {
                print_success(&format!(
                    "Copied existing bindings to {}",
                    style.path(&main_fragment)
                ));
                if original_written {
                    print_info(&format!(
                        "Original keybindings saved to {}",
                        original_backup.display()
                    ));
                } else {
                    print_info("An earlier original backup was kept");
                }
            }
        }

        println!("{}", style.tip("Run 'keysync sync' to merge the folder into keybindings.json"));
        Ok(())
    }
}

/// Forget the configured files and folder
pub struct ResetCommand {
    ctx: AppContext,
}

impl ResetCommand {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for ResetCommand {
    async fn execute(&self) -> CliResult<()> {
        let confirmed = self
            .ctx
            .prompter()
            .confirm("This clears the configured files and keybindings folder. Continue?");
        if !confirmed {
            print_info("Reset cancelled");
            return Ok(());
        }

        self.ctx.update_config(|c| c.reset_sources())?;
        print_success("Cleared keybindings sources; fragment files were not deleted");
        Ok(())
    }
}
