//! Writing the active keybindings file
//!
//! # File Format
//!
//! The active file is a pretty-printed JSON array (two-space indent) with a
//! trailing newline:
//!
//! ```json
//! [
//!   {
//!     "key": "ctrl+shift+p",
//!     "command": "workbench.action.showCommands"
//!   }
//! ]
//! ```
//!
//! The file is replaced atomically: the new content goes to a temporary file
//! next to the target which is then renamed over it, so a failed write
//! leaves the previous file untouched. A symlinked target is followed and
//! the linked file is replaced, keeping the link itself in place.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::error::PersistenceError;
use crate::models::BindingRecord;

/// Render records exactly as they are written to disk
pub fn render_keybindings(records: &[BindingRecord]) -> Result<String, PersistenceError> {
    let mut json = serde_json::to_string_pretty(records).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to serialize keybindings: {}", e))
    })?;
    json.push('\n');
    Ok(json)
}

/// Replace the keybindings file at `path` with `records`
pub fn write_keybindings(path: &Path, records: &[BindingRecord]) -> Result<(), PersistenceError> {
    let content = render_keybindings(records)?;
    write_atomic(path, content.as_bytes())?;
    debug!("Wrote {} binding(s) to {}", records.len(), path.display());
    Ok(())
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), PersistenceError> {
    let target = resolve_link(path)?;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let tmp_path = temp_path_for(&target);
    let result = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp_path, &target));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_error(&target, e));
    }
    Ok(())
}

/// Follow a symlinked output so the rename lands on the linked file
fn resolve_link(path: &Path) -> Result<PathBuf, PersistenceError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => {
                debug!("{} links to {}", path.display(), target.display());
                Ok(target)
            }
            // Dangling link: write where it points
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let link = fs::read_link(path).map_err(|e| write_error(path, e))?;
                Ok(match path.parent() {
                    Some(parent) if link.is_relative() => parent.join(link),
                    _ => link,
                })
            }
            Err(e) => Err(write_error(path, e)),
        },
        _ => Ok(path.to_path_buf()),
    }
}

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "keybindings.json".to_string());
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
}

fn write_error(path: &Path, e: std::io::Error) -> PersistenceError {
    if e.kind() == ErrorKind::PermissionDenied {
        PersistenceError::PermissionDenied(path.to_path_buf())
    } else {
        PersistenceError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_format() {
        let records = vec![BindingRecord::new("ctrl+s", "save").with_when("editorFocus")];
        let rendered = render_keybindings(&records).unwrap();
        assert_eq!(
            rendered,
            "[\n  {\n    \"key\": \"ctrl+s\",\n    \"command\": \"save\",\n    \"when\": \"editorFocus\"\n  }\n]\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_keybindings(&[]).unwrap(), "[]\n");
    }

    #[test]
    fn test_render_preserves_args_member_order() {
        let args = json!({"zeta": 1, "alpha": 2});
        let records = vec![BindingRecord::new("k", "c").with_args(args)];
        let rendered = render_keybindings(&records).unwrap();
        assert!(rendered.find("zeta").unwrap() < rendered.find("alpha").unwrap());
    }

    #[test]
    fn test_write_replaces_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybindings.json");
        fs::write(&path, "old").unwrap();

        write_keybindings(&path, &[BindingRecord::new("a", "b")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"command\": \"b\""));
        assert!(content.ends_with("]\n"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("User").join("keybindings.json");
        write_keybindings(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_temp_paths_are_unique_per_call() {
        let path = Path::new("/u/keybindings.json");
        assert_ne!(temp_path_for(path), temp_path_for(path));
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = write_keybindings(&blocker.join("keybindings.json"), &[]);
        assert!(result.is_err());
    }
}
