// Logging and verbosity control

use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::Level;

use crate::error::{CliError, CliResult};

/// Global verbosity level
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Quiet mode - errors only
    Quiet = 0,
    /// Normal mode - standard output
    Normal = 1,
    /// Verbose mode - detailed output
    Verbose = 2,
}

impl VerbosityLevel {
    /// Get the current verbosity level
    pub fn current() -> Self {
        match VERBOSITY.load(Ordering::Relaxed) {
            0 => VerbosityLevel::Quiet,
            1 => VerbosityLevel::Normal,
            _ => VerbosityLevel::Verbose,
        }
    }

    /// Set the verbosity level
    pub fn set(level: Self) {
        VERBOSITY.store(level as u8, Ordering::Relaxed);
    }

    /// Check if we should output at this level
    pub fn should_output(&self) -> bool {
        self <= &Self::current()
    }

    /// Tracing level used when no explicit log level is given
    pub fn tracing_level(&self) -> Level {
        match self {
            VerbosityLevel::Quiet => Level::ERROR,
            VerbosityLevel::Normal => Level::WARN,
            VerbosityLevel::Verbose => Level::DEBUG,
        }
    }
}

/// Pick the verbosity level from CLI flags
pub fn verbosity_from_flags(verbose: bool, quiet: bool) -> VerbosityLevel {
    if quiet {
        VerbosityLevel::Quiet
    } else if verbose {
        VerbosityLevel::Verbose
    } else {
        VerbosityLevel::Normal
    }
}

/// Parse a `--log-level` value (trace, debug, info, warn, error)
pub fn parse_log_level(value: &str) -> CliResult<Level> {
    Level::from_str(value.trim()).map_err(|_| CliError::InvalidArgument {
        message: format!(
            "unknown log level '{}' (expected trace, debug, info, warn or error)",
            value
        ),
    })
}

/// Initialize logging based on CLI flags
///
/// Diagnostics go to stderr so command output on stdout stays clean.
pub fn init_logging(verbose: bool, quiet: bool, log_level: Option<&str>) -> CliResult<()> {
    let verbosity = verbosity_from_flags(verbose, quiet);
    VerbosityLevel::set(verbosity);

    let level = match log_level {
        Some(value) => parse_log_level(value)?,
        None => verbosity.tracing_level(),
    };

    // A subscriber may already be installed when running inside tests.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    Ok(())
}
