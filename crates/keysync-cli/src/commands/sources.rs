// Show merge sources

use async_trait::async_trait;
use keysync_keybinds::resolver::normalize_path;
use keysync_keybinds::SourceResolver;

use super::Command;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::{OutputStyle, SourceState};

/// List the sources a sync would read, in merge order
pub struct SourcesCommand {
    ctx: AppContext,
}

impl SourcesCommand {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for SourcesCommand {
    async fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let sources = self.ctx.config().source_config();

        let resolved = SourceResolver::resolve(&sources);

        println!("{}", style.section("Configured files"));
        if sources.explicit_files.is_empty() {
            println!("{}", style.empty_entry("(none)"));
        }
        for entry in &sources.explicit_files {
            let path = normalize_path(&sources.resolve_path(entry));
            let state = match resolved.iter().position(|p| *p == path) {
                Some(i) => SourceState::Merged(i + 1),
                None => SourceState::Missing,
            };
            println!("{}", style.source_entry(&path, state));
        }

        println!("{}", style.section("Keybindings folder"));
        match sources.resolved_folder() {
            Some(folder) => {
                println!("{}", style.setting("path", &folder.display().to_string()));
                println!("{}", style.setting("pattern", sources.pattern()));
            }
            None => println!("{}", style.empty_entry("(not configured)")),
        }

        println!("{}", style.section("Merge order"));
        if resolved.is_empty() {
            println!("{}", style.empty_entry("(no sources found)"));
        }
        for (i, path) in resolved.iter().enumerate() {
            println!("{}", style.source_entry(path, SourceState::Merged(i + 1)));
        }

        println!();
        println!(
            "{}",
            style.info(&format!(
                "Output: {}",
                self.ctx.config().keybindings_path().display()
            ))
        );
        Ok(())
    }
}
