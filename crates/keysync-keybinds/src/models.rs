//! Core data models for keybinding records and merge sources

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default glob used when scanning a keybindings folder
pub const DEFAULT_FILE_PATTERN: &str = "*.jsonc";

/// A single key-to-command binding as found in a keybindings fragment
///
/// Field order here is the serialization order of the active keybindings
/// file: `key`, `command`, `when`, `args`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingRecord {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// Opaque payload, never inspected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

impl BindingRecord {
    /// Create a new binding without a `when` clause or arguments
    pub fn new(key: impl Into<String>, command: impl Into<String>) -> Self {
        BindingRecord {
            key: key.into(),
            command: command.into(),
            when: None,
            args: None,
        }
    }

    /// Attach a `when` clause; an empty clause is the same as none
    pub fn with_when(mut self, when: impl Into<String>) -> Self {
        let when = when.into();
        self.when = if when.is_empty() { None } else { Some(when) };
        self
    }

    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = Some(args);
        self
    }

    /// Identity used for deduplication; `args` does not participate
    pub fn identity(&self) -> IdentityKey {
        IdentityKey {
            key: self.key.clone(),
            command: self.command.clone(),
            when: self.when.clone().unwrap_or_default(),
        }
    }
}

/// The `(key, command, when-or-empty)` tuple that detects duplicate bindings
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub key: String,
    pub command: String,
    pub when: String,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.key, self.command, self.when)
    }
}

/// Where keybinding fragments come from
///
/// Relative entries are resolved against `base_dir`, which callers pass in
/// explicitly (normally the editor's user directory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Individual fragment files, in priority order
    #[serde(default)]
    pub explicit_files: Vec<String>,
    /// Folder scanned with `file_pattern`
    #[serde(default)]
    pub folder_path: Option<String>,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    pub base_dir: PathBuf,
}

/// Options used when matching files inside the folder; hidden files need a
/// pattern that starts with a dot
pub const FOLDER_MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

impl SourceConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        SourceConfig {
            explicit_files: Vec::new(),
            folder_path: None,
            file_pattern: default_file_pattern(),
            base_dir: base_dir.into(),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder_path = Some(folder.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// The configured folder, if set to something other than whitespace
    pub fn folder(&self) -> Option<&str> {
        self.folder_path
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    /// The glob applied inside the folder, falling back to `*.jsonc`
    pub fn pattern(&self) -> &str {
        let pattern = self.file_pattern.trim();
        if pattern.is_empty() {
            DEFAULT_FILE_PATTERN
        } else {
            pattern
        }
    }

    /// Whether a file called `file_name` inside the folder would be scanned
    pub fn matches_pattern(&self, file_name: &str) -> bool {
        glob::Pattern::new(self.pattern())
            .map(|pattern| pattern.matches_with(file_name, FOLDER_MATCH_OPTIONS))
            .unwrap_or(false)
    }

    /// Resolve `path` against the base directory unless it is absolute
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Absolute location of the configured folder
    pub fn resolved_folder(&self) -> Option<PathBuf> {
        self.folder().map(|folder| self.resolve_path(folder))
    }
}
