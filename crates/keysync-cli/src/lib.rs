// keysync CLI library

pub mod commands;
pub mod context;
pub mod error;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod router;

pub use context::AppContext;
pub use error::{CliError, CliResult};
pub use logging::{init_logging, VerbosityLevel};
pub use prompt::TerminalPrompter;
pub use router::{Cli, CommandRouter, Commands};
