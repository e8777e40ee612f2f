// Entry point for external file watchers

use async_trait::async_trait;
use tracing::debug;

use super::sync::report_outcome;
use super::Command;
use crate::context::AppContext;
use crate::error::CliResult;

/// Sync when auto-sync is enabled, otherwise do nothing
pub struct OnChangeCommand {
    ctx: AppContext,
}

impl OnChangeCommand {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for OnChangeCommand {
    async fn execute(&self) -> CliResult<()> {
        match self.ctx.sync_service().on_sources_changed().await? {
            Some(outcome) => report_outcome(&outcome),
            None => debug!("auto_sync is off, nothing to do"),
        }
        Ok(())
    }
}
