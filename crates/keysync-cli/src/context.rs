// Shared state handed to every command

use std::sync::Arc;

use keysync_config::{ConfigManager, ManagerConfig};
use keysync_keybinds::{Prompter, SyncService};
use tracing::debug;

use crate::error::CliResult;
use crate::prompt::TerminalPrompter;
use crate::router::Cli;

/// Loaded configuration plus the way to talk to the user
pub struct AppContext {
    manager: ConfigManager,
    /// Configuration as stored, without command-line overrides
    stored: ManagerConfig,
    /// Configuration the commands act on
    effective: ManagerConfig,
    prompter: Arc<dyn Prompter>,
}

impl AppContext {
    /// Load configuration for the given command line
    pub fn load(cli: &Cli) -> CliResult<Self> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };
        let stored = manager.load_validated()?;

        let mut effective = stored.clone();
        if let Some(user_dir) = &cli.user_dir {
            effective.user_dir = Some(user_dir.clone());
        }
        debug!("Using user directory {}", effective.user_dir().display());

        Ok(Self {
            manager,
            stored,
            effective,
            prompter: Arc::new(TerminalPrompter::new(cli.yes)),
        })
    }

    /// Build a context from parts
    pub fn new(manager: ConfigManager, config: ManagerConfig, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            manager,
            stored: config.clone(),
            effective: config,
            prompter,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.effective
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    pub fn sync_service(&self) -> SyncService {
        SyncService::new(
            self.effective.source_config(),
            self.effective.keybindings_path(),
            self.effective.backup_manager(),
        )
        .with_auto_sync(self.effective.auto_sync)
    }

    /// Apply `change` to the stored configuration, validate and save it
    ///
    /// Returns the saved configuration.
    pub fn update_config<F>(&self, change: F) -> CliResult<ManagerConfig>
    where
        F: FnOnce(&mut ManagerConfig),
    {
        self.try_update_config(|config| {
            change(config);
            Ok(())
        })
    }

    /// Like [`AppContext::update_config`]; nothing is saved when `change` fails
    pub fn try_update_config<F>(&self, change: F) -> CliResult<ManagerConfig>
    where
        F: FnOnce(&mut ManagerConfig) -> CliResult<()>,
    {
        let mut updated = self.stored.clone();
        change(&mut updated)?;
        self.manager.validate_config(&updated)?;
        self.manager.save_config(&updated)?;
        Ok(updated)
    }
}
