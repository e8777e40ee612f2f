// Merge commands

use async_trait::async_trait;
use keysync_keybinds::{SyncOutcome, SyncReport};

use super::Command;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::logging::VerbosityLevel;
use crate::output::{count, print_info, print_warning, OutputStyle};

/// Merge every configured source into the active keybindings file
pub struct SyncCommand {
    ctx: AppContext,
    backup: bool,
}

impl SyncCommand {
    pub fn new(ctx: AppContext, backup: bool) -> Self {
        Self { ctx, backup }
    }
}

#[async_trait]
impl Command for SyncCommand {
    async fn execute(&self) -> CliResult<()> {
        let outcome = self.ctx.sync_service().sync(self.backup).await?;
        report_outcome(&outcome);
        Ok(())
    }
}

/// Merge only the fragments in the configured folder
pub struct MergeFolderCommand {
    ctx: AppContext,
}

impl MergeFolderCommand {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for MergeFolderCommand {
    async fn execute(&self) -> CliResult<()> {
        let outcome = self.ctx.sync_service().merge_folder().await?;
        if outcome == SyncOutcome::NoSources {
            print_warning(&format!(
                "No files matching '{}' in the keybindings folder",
                self.ctx.config().source_config().pattern()
            ));
            return Ok(());
        }
        report_outcome(&outcome);
        Ok(())
    }
}

/// Print what a sync did
pub(crate) fn report_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::NoSources => {
            print_warning("No keybindings sources found; keybindings.json was not changed");
            let style = OutputStyle::default();
            println!(
                "{}",
                style.tip("Run 'keysync setup' or 'keysync config add-file <FILE>' to add sources")
            );
        }
        SyncOutcome::Synced(report) => report_synced(report),
    }
}

fn report_synced(report: &SyncReport) {
    let style = OutputStyle::default();

    for skipped in &report.skipped {
        eprintln!("{}", style.skipped_source(skipped));
    }

    if VerbosityLevel::Normal.should_output() {
        println!(
            "{}",
            style.merge_summary(report.merged, report.sources.len(), &report.output)
        );
    }

    if report.duplicates_dropped > 0 {
        print_info(&format!(
            "Dropped {}",
            count(report.duplicates_dropped, "duplicate binding", "duplicate bindings")
        ));
    }
    if report.invalid_dropped > 0 {
        print_info(&format!(
            "Ignored {} without a key and command",
            count(report.invalid_dropped, "entry", "entries")
        ));
    }
    if let Some(backup) = &report.backup {
        let name = backup
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| backup.display().to_string());
        print_info(&format!("Previous file backed up as {}", name));
    }
}
