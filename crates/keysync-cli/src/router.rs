// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::*;
use crate::context::AppContext;
use crate::error::CliResult;

/// keysync - merge keybinding fragments into one keybindings file
#[derive(Parser, Debug)]
#[command(name = "keysync")]
#[command(bin_name = "keysync")]
#[command(about = "Merge JSONC keybinding fragments into a single keybindings file")]
#[command(
    long_about = "keysync keeps your editor keybindings in small JSON-with-comments fragments and merges them into the active keybindings.json.\n\nQuick start:\n  • keysync setup keybindings   Create a fragments folder and migrate existing bindings\n  • keysync new git.jsonc       Create a new fragment\n  • keysync sync --backup       Merge all fragments, keeping a backup\n  • keysync sources             Show which files would be merged"
)]
#[command(version)]
#[command(author = "keysync Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log level for diagnostics (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Configuration file to use instead of the default
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Editor user directory holding keybindings.json
    #[arg(long, global = true, value_name = "DIR")]
    pub user_dir: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Merge all configured sources into keybindings.json
    #[command(about = "Merge configured files and folder fragments into keybindings.json")]
    Sync {
        /// Back up the current keybindings.json first
        #[arg(short, long)]
        backup: bool,
    },

    /// Merge only the fragments in the keybindings folder
    #[command(about = "Merge only the fragments found in the keybindings folder")]
    MergeFolder,

    /// Show the files that would be merged
    #[command(about = "List configured and discovered keybinding sources in merge order")]
    Sources,

    /// Back up keybindings.json
    #[command(about = "Create a timestamped backup of keybindings.json")]
    Backup,

    /// Restore keybindings.json from a backup
    #[command(about = "Restore keybindings.json from a backup")]
    Restore {
        /// Backup file name; choose interactively when omitted
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },

    /// Restore the keybindings saved before the first migration
    #[command(about = "Restore keybindings.json from the original backup")]
    RestoreOriginal,

    /// Create the keybindings folder and migrate existing bindings
    #[command(about = "Create a keybindings folder and migrate existing bindings into it")]
    Setup {
        /// Folder path, relative to the user directory unless absolute
        #[arg(value_name = "FOLDER")]
        folder: Option<String>,
    },

    /// Create a new keybindings fragment
    #[command(about = "Create a new keybindings fragment file")]
    New {
        /// File name, e.g. keybindings-git.jsonc
        #[arg(value_name = "NAME")]
        name: String,

        /// Create the file in the keybindings folder instead of the user directory
        #[arg(long)]
        in_folder: bool,
    },

    /// Clear the configured files and folder
    #[command(about = "Forget all configured files and the keybindings folder")]
    Reset,

    /// Sync after an external change notification, if auto-sync is on
    #[command(about = "Sync when auto_sync is enabled; for use from file watchers")]
    OnChange,

    /// View and change configuration
    #[command(about = "View and manage keysync configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigSubcommand>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    #[command(about = "Display all configuration settings")]
    Show,

    /// Print the configuration file path
    #[command(about = "Print the configuration file location")]
    Path,

    /// Set a configuration value
    #[command(about = "Set a configuration value")]
    Set {
        /// Setting name (folder, file_pattern, auto_sync, ...)
        #[arg(value_name = "KEY")]
        key: String,

        /// New value; empty clears optional settings
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Append a file to the explicit source list
    #[command(about = "Add a keybindings file to the merge list")]
    AddFile {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Remove a file from the explicit source list
    #[command(about = "Remove a keybindings file from the merge list")]
    RemoveFile {
        #[arg(value_name = "FILE")]
        file: String,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet, cli.log_level.as_deref())?;

        let ctx = AppContext::load(&cli)?;
        Self::execute(&cli, ctx).await
    }

    /// Execute a command
    pub async fn execute(cli: &Cli, ctx: AppContext) -> CliResult<()> {
        // Default to a plain sync if no command specified
        let command = cli.command.clone().unwrap_or(Commands::Sync { backup: false });

        match command {
            Commands::Sync { backup } => SyncCommand::new(ctx, backup).execute().await,
            Commands::MergeFolder => MergeFolderCommand::new(ctx).execute().await,
            Commands::Sources => SourcesCommand::new(ctx).execute().await,
            Commands::Backup => BackupCommand::new(ctx).execute().await,
            Commands::Restore { name } => RestoreCommand::new(ctx, name).execute().await,
            Commands::RestoreOriginal => RestoreOriginalCommand::new(ctx).execute().await,
            Commands::Setup { folder } => SetupCommand::new(ctx, folder).execute().await,
            Commands::New { name, in_folder } => {
                NewCommand::new(ctx, name).with_in_folder(in_folder).execute().await
            }
            Commands::Reset => ResetCommand::new(ctx).execute().await,
            Commands::OnChange => OnChangeCommand::new(ctx).execute().await,
            Commands::Config { action } => {
                let config_action = match action {
                    Some(ConfigSubcommand::Show) | None => ConfigAction::Show,
                    Some(ConfigSubcommand::Path) => ConfigAction::Path,
                    Some(ConfigSubcommand::Set { key, value }) => ConfigAction::Set(key, value),
                    Some(ConfigSubcommand::AddFile { file }) => ConfigAction::AddFile(file),
                    Some(ConfigSubcommand::RemoveFile { file }) => ConfigAction::RemoveFile(file),
                };
                ConfigCommand::new(ctx, config_action).execute().await
            }
        }
    }
}
