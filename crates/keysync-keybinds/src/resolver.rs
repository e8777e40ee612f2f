//! Expanding a [`SourceConfig`] into the ordered list of fragment files
//!
//! Explicit files come first in their configured order, followed by the
//! folder matches in glob order. A path listed twice (for example an
//! explicit file that also lives in the scanned folder) is kept at its first
//! position only.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};

use crate::models::{SourceConfig, FOLDER_MATCH_OPTIONS};

/// Resolves configured sources to absolute paths
pub struct SourceResolver;

impl SourceResolver {
    /// All sources: existing explicit files, then folder matches, deduplicated
    pub fn resolve(config: &SourceConfig) -> Vec<PathBuf> {
        let explicit = Self::resolve_explicit(config);
        let folder = Self::resolve_folder(config);
        dedup_paths(explicit.into_iter().chain(folder))
    }

    /// Explicit files that exist right now, in configured order
    pub fn resolve_explicit(config: &SourceConfig) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in &config.explicit_files {
            let path = normalize_path(&config.resolve_path(entry));
            if path.exists() {
                files.push(path);
            } else {
                debug!("Configured keybindings file {} does not exist", path.display());
            }
        }
        dedup_paths(files)
    }

    /// Files in the configured folder matching the configured pattern
    ///
    /// The scan is not recursive, even if the pattern contains separators.
    /// Hidden files only match a pattern that itself starts with a dot.
    pub fn resolve_folder(config: &SourceConfig) -> Vec<PathBuf> {
        let Some(folder) = config.resolved_folder() else {
            return Vec::new();
        };
        let folder = normalize_path(&folder);

        if !folder.is_dir() {
            debug!("Keybindings folder {} does not exist", folder.display());
            return Vec::new();
        }

        let normalized = folder.to_string_lossy().replace('\\', "/");
        let pattern = format!(
            "{}/{}",
            Pattern::escape(normalized.trim_end_matches('/')),
            config.pattern()
        );

        let entries = match glob::glob_with(&pattern, FOLDER_MATCH_OPTIONS) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Invalid keybindings file pattern '{}': {}", config.pattern(), e);
                return Vec::new();
            }
        };

        let mut matches = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => {
                    let path = normalize_path(&path);
                    let direct_child = path.parent() == Some(folder.as_path());
                    if direct_child && path.is_file() {
                        matches.push(path);
                    }
                }
                Err(e) => warn!("Failed to read entry while scanning {}: {}", folder.display(), e),
            }
        }

        debug!(
            "Found {} keybindings file(s) in {}",
            matches.len(),
            folder.display()
        );
        dedup_paths(matches)
    }
}

/// Collapse duplicate paths, keeping the first occurrence
fn dedup_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Lexically clean a path: drop `.` components and fold `..` where possible
///
/// The file system is not consulted, so symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let paths = vec![
            PathBuf::from("/x/b"),
            PathBuf::from("/x/a"),
            PathBuf::from("/x/b"),
        ];
        assert_eq!(
            dedup_paths(paths),
            vec![PathBuf::from("/x/b"), PathBuf::from("/x/a")]
        );
    }

    #[test]
    fn test_unset_folder_yields_nothing() {
        let config = SourceConfig::new("/nonexistent-base");
        assert!(SourceResolver::resolve_folder(&config).is_empty());
    }
}
