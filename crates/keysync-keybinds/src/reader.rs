//! Reading keybinding fragments from disk
//!
//! A fragment that cannot be used contributes no records. Missing files are
//! silently empty; unreadable, malformed or non-array files additionally
//! produce a [`SourceWarning`] so the caller can tell the user which files
//! were skipped.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::jsonc;
use crate::models::BindingRecord;
use crate::validate::validate_all;

/// Why a source was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
    /// The file exists but could not be read
    Unreadable(String),
    /// The text is not valid JSON after comment stripping
    Malformed(String),
    /// The top-level value is not an array
    NotAnArray,
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            WarningReason::Malformed(e) => write!(f, "malformed JSONC: {}", e),
            WarningReason::NotAnArray => write!(f, "top-level value is not an array"),
        }
    }
}

/// A recoverable problem with a single source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWarning {
    pub path: PathBuf,
    pub reason: WarningReason,
}

impl SourceWarning {
    /// File name for compact reporting, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Records read from one source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRead {
    pub path: PathBuf,
    /// Valid records in document order
    pub records: Vec<BindingRecord>,
    /// Array elements dropped by validation
    pub rejected: usize,
    pub warning: Option<SourceWarning>,
}

impl SourceRead {
    fn empty(path: &Path) -> Self {
        SourceRead {
            path: path.to_path_buf(),
            records: Vec::new(),
            rejected: 0,
            warning: None,
        }
    }

    fn skipped(path: &Path, reason: WarningReason) -> Self {
        warn!("Skipping keybindings source {}: {}", path.display(), reason);
        SourceRead {
            warning: Some(SourceWarning {
                path: path.to_path_buf(),
                reason,
            }),
            ..Self::empty(path)
        }
    }
}

/// Read, strip, parse and validate one fragment file
pub fn read_source(path: &Path) -> SourceRead {
    from_read_result(path, std::fs::read_to_string(path))
}

/// Async variant of [`read_source`]
pub async fn read_source_async(path: &Path) -> SourceRead {
    from_read_result(path, tokio::fs::read_to_string(path).await)
}

fn from_read_result(path: &Path, result: std::io::Result<String>) -> SourceRead {
    match result {
        Ok(text) => read_text(path, &text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Keybindings source {} does not exist", path.display());
            SourceRead::empty(path)
        }
        Err(e) => SourceRead::skipped(path, WarningReason::Unreadable(e.to_string())),
    }
}

/// Run the strip/parse/validate pipeline on text already loaded from `path`
pub fn read_text(path: &Path, text: &str) -> SourceRead {
    let items = match jsonc::parse(text) {
        Ok(Value::Array(items)) => items,
        Ok(_) => return SourceRead::skipped(path, WarningReason::NotAnArray),
        Err(e) => return SourceRead::skipped(path, WarningReason::Malformed(e.to_string())),
    };

    let validated = validate_all(&items);
    if validated.rejected > 0 {
        debug!(
            "Dropped {} malformed binding(s) from {}",
            validated.rejected,
            path.display()
        );
    }

    SourceRead {
        path: path.to_path_buf(),
        records: validated.records,
        rejected: validated.rejected,
        warning: None,
    }
}
