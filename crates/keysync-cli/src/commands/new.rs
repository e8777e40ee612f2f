// Create keybinding fragments

use async_trait::async_trait;
use keysync_keybinds::{create_fragment, FragmentOutcome};

use super::Command;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success, OutputStyle};

/// Write a commented fragment template and register it as a source
///
/// Fragments go in the user directory and are appended to `files`. With
/// `--in-folder` they go in the keybindings folder and are only appended
/// when the folder pattern would not pick them up.
pub struct NewCommand {
    ctx: AppContext,
    name: String,
    in_folder: bool,
}

impl NewCommand {
    pub fn new(ctx: AppContext, name: String) -> Self {
        Self {
            ctx,
            name,
            in_folder: false,
        }
    }

    pub fn with_in_folder(mut self, in_folder: bool) -> Self {
        self.in_folder = in_folder;
        self
    }
}

#[async_trait]
impl Command for NewCommand {
    async fn execute(&self) -> CliResult<()> {
        let config = self.ctx.config();
        let sources = config.source_config();
        let name = self.name.trim().to_string();

        let (dir, entry, scanned) = if self.in_folder {
            let (Some(setting), Some(folder)) = (sources.folder(), sources.resolved_folder()) else {
                return Err(CliError::FolderNotConfigured);
            };
            let entry = format!("{}/{}", setting.trim_end_matches(['/', '\\']), name);
            (folder, entry, sources.matches_pattern(&name))
        } else {
            (config.user_dir(), name.clone(), false)
        };

        let path = match create_fragment(&dir, &name, self.ctx.prompter()).await? {
            FragmentOutcome::Created(path) => path,
            FragmentOutcome::Kept(path) => {
                print_info(&format!("Kept existing {}", path.display()));
                return Ok(());
            }
        };

        let style = OutputStyle::default();
        print_success(&format!(
            "Created {}",
            style.path(&path)
        ));

        if !scanned && !config.files.contains(&entry) {
            self.ctx.update_config(|c| {
                c.add_file(entry.clone());
            })?;
            print_info(&format!("Added {} to the merge list", entry));
        }
        Ok(())
    }
}
