//! Sync workflow: resolve, merge, write
//!
//! [`SyncService`] ties the pipeline together for a host application. It
//! never talks to the user directly; it returns a [`SyncOutcome`] the host
//! turns into messages.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backup::BackupManager;
use crate::error::WorkflowError;
use crate::merge::{KeybindMerger, MergeResult};
use crate::models::SourceConfig;
use crate::persistence::write_keybindings;
use crate::reader::SourceWarning;
use crate::resolver::SourceResolver;

/// Summary of a completed sync
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Sources merged, in merge order
    pub sources: Vec<PathBuf>,
    /// Bindings written to the active file
    pub merged: usize,
    pub duplicates_dropped: usize,
    pub invalid_dropped: usize,
    /// Sources skipped because they could not be used
    pub skipped: Vec<SourceWarning>,
    /// Backup taken before writing, if one was requested
    pub backup: Option<PathBuf>,
    pub output: PathBuf,
}

/// What a sync did
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// No source files were found; nothing was written
    NoSources,
    Synced(SyncReport),
}

/// Merges configured fragments into the active keybindings file
#[derive(Debug, Clone)]
pub struct SyncService {
    sources: SourceConfig,
    output: PathBuf,
    backups: BackupManager,
    auto_sync: bool,
}

impl SyncService {
    pub fn new(sources: SourceConfig, output: impl Into<PathBuf>, backups: BackupManager) -> Self {
        SyncService {
            sources,
            output: output.into(),
            backups,
            auto_sync: true,
        }
    }

    pub fn with_auto_sync(mut self, auto_sync: bool) -> Self {
        self.auto_sync = auto_sync;
        self
    }

    pub fn source_config(&self) -> &SourceConfig {
        &self.sources
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Every configured source that currently resolves to a file
    pub fn resolve_sources(&self) -> Vec<PathBuf> {
        SourceResolver::resolve(&self.sources)
    }

    /// Merge all sources into the active file, optionally backing it up first
    pub async fn sync(&self, backup: bool) -> Result<SyncOutcome, WorkflowError> {
        let sources = self.resolve_sources();
        if sources.is_empty() {
            info!("No keybindings sources found");
            return Ok(SyncOutcome::NoSources);
        }

        let backup_path = if backup && self.output.exists() {
            Some(self.backups.create_backup(&self.output).await?)
        } else {
            None
        };

        let result = KeybindMerger::merge_concurrent(&sources).await;
        self.write(sources, result, backup_path)
    }

    /// Merge only the files found in the configured folder
    pub async fn merge_folder(&self) -> Result<SyncOutcome, WorkflowError> {
        if self.sources.folder().is_none() {
            return Err(WorkflowError::FolderNotConfigured);
        }

        let sources = SourceResolver::resolve_folder(&self.sources);
        if sources.is_empty() {
            info!(
                "No files matching '{}' in keybindings folder",
                self.sources.pattern()
            );
            return Ok(SyncOutcome::NoSources);
        }

        let result = KeybindMerger::merge_concurrent(&sources).await;
        self.write(sources, result, None)
    }

    /// Entry point for an external change notifier
    ///
    /// Syncs without a backup when auto-sync is enabled; returns `None`
    /// otherwise.
    pub async fn on_sources_changed(&self) -> Result<Option<SyncOutcome>, WorkflowError> {
        if !self.auto_sync {
            debug!("Auto-sync disabled, ignoring source change");
            return Ok(None);
        }
        self.sync(false).await.map(Some)
    }

    fn write(
        &self,
        sources: Vec<PathBuf>,
        result: MergeResult,
        backup: Option<PathBuf>,
    ) -> Result<SyncOutcome, WorkflowError> {
        write_keybindings(&self.output, &result.records)?;
        info!(
            "Synced {} binding(s) to {}",
            result.records.len(),
            self.output.display()
        );

        Ok(SyncOutcome::Synced(SyncReport {
            sources,
            merged: result.records.len(),
            duplicates_dropped: result.duplicates_dropped,
            invalid_dropped: result.invalid_dropped,
            skipped: result.warnings,
            backup,
            output: self.output.clone(),
        }))
    }
}
