//! Creating new keybinding fragment files

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs;
use tracing::info;

use crate::error::WorkflowError;
use crate::prompt::Prompter;

/// Letters, digits, `_`, `-` and `.` only
static FILE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\-.]+$").unwrap());

/// Result of creating a fragment
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentOutcome {
    Created(PathBuf),
    /// The file existed and the user declined to overwrite it
    Kept(PathBuf),
}

/// Check that `name` is usable as a fragment file name
pub fn validate_file_name(name: &str) -> Result<&str, WorkflowError> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." || !FILE_NAME_PATTERN.is_match(name) {
        return Err(WorkflowError::InvalidFileName(name.to_string()));
    }
    Ok(name)
}

/// Commented starter content for a new fragment
pub fn fragment_template(name: &str) -> String {
    format!(
        r#"// {name} - custom keybindings
// Add bindings to the list below, for example:
// {{
//   "key": "ctrl+shift+p",
//   "command": "workbench.action.showCommands",
//   "when": "editorTextFocus"
// }}
[]
"#
    )
}

/// Write a new fragment named `name` into `dir`
pub async fn create_fragment(
    dir: &Path,
    name: &str,
    prompter: &dyn Prompter,
) -> Result<FragmentOutcome, WorkflowError> {
    let name = validate_file_name(name)?;
    let path = dir.join(name);

    if fs::try_exists(&path).await.unwrap_or(false)
        && !prompter.confirm(&format!("{} already exists. Overwrite it?", path.display()))
    {
        return Ok(FragmentOutcome::Kept(path));
    }

    fs::create_dir_all(dir).await?;
    fs::write(&path, fragment_template(name)).await?;
    info!("Created keybindings fragment {}", path.display());
    Ok(FragmentOutcome::Created(path))
}
