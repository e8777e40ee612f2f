// Terminal output for merge reports, source listings and messages

use std::path::Path;

use colored::Colorize;
use keysync_keybinds::SourceWarning;

use crate::logging::VerbosityLevel;

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

/// State of one configured source in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Will be merged at this 1-based position
    Merged(usize),
    /// Configured but not on disk
    Missing,
}

impl OutputStyle {
    fn marked(&self, mark: &str, msg: &str, paint: fn(&str) -> colored::ColoredString) -> String {
        if self.use_colors {
            format!("{} {}", paint(mark), msg)
        } else {
            format!("{} {}", mark, msg)
        }
    }

    pub fn success(&self, msg: &str) -> String {
        self.marked("✓", msg, |m| m.green().bold())
    }

    pub fn error(&self, msg: &str) -> String {
        self.marked("✗", msg, |m| m.red().bold())
    }

    pub fn warning(&self, msg: &str) -> String {
        self.marked("⚠", msg, |m| m.yellow())
    }

    pub fn info(&self, msg: &str) -> String {
        self.marked("ℹ", msg, |m| m.blue())
    }

    pub fn tip(&self, tip: &str) -> String {
        self.marked("💡", tip, |m| m.yellow())
    }

    /// A path, highlighted
    pub fn path(&self, path: &Path) -> String {
        let text = path.display().to_string();
        if self.use_colors {
            text.cyan().to_string()
        } else {
            text
        }
    }

    /// Prompt text shown before reading an answer
    pub fn prompt(&self, prompt: &str) -> String {
        if self.use_colors {
            format!("{} ", prompt.magenta().bold())
        } else {
            format!("{} ", prompt)
        }
    }

    pub fn header(&self, title: &str) -> String {
        if self.use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Section title underlined to its own width
    pub fn section(&self, title: &str) -> String {
        let rule = "─".repeat(title.chars().count());
        if self.use_colors {
            format!("\n{}\n{}", title.bold().underline(), rule)
        } else {
            format!("\n{}\n{}", title, rule)
        }
    }

    /// Placeholder line for an empty listing, e.g. `(none)`
    pub fn empty_entry(&self, text: &str) -> String {
        format!("  • {}", text)
    }

    /// One entry of a `keysync sources` listing
    pub fn source_entry(&self, path: &Path, state: SourceState) -> String {
        match state {
            SourceState::Merged(position) => format!("  {}. {}", position, self.path(path)),
            SourceState::Missing => {
                let missing = if self.use_colors {
                    "(missing)".dimmed().to_string()
                } else {
                    "(missing)".to_string()
                };
                format!("  • {} {}", path.display(), missing)
            }
        }
    }

    /// Numbered choice in an interactive selection
    pub fn choice(&self, number: usize, label: &str) -> String {
        format!("  {}. {}", number, label)
    }

    /// Aligned `setting: value` line
    pub fn setting(&self, key: &str, value: &str) -> String {
        if self.use_colors {
            format!("  {}: {}", key.bold(), value)
        } else {
            format!("  {}: {}", key, value)
        }
    }

    /// Why a fragment was left out of a merge
    pub fn skipped_source(&self, warning: &SourceWarning) -> String {
        self.warning(&format!("Skipped {}: {}", warning.file_name(), warning.reason))
    }

    /// Headline of a completed merge
    pub fn merge_summary(&self, merged: usize, files: usize, output: &Path) -> String {
        self.success(&format!(
            "Merged {} from {} into {}",
            count(merged, "binding", "bindings"),
            count(files, "file", "files"),
            self.path(output)
        ))
    }
}

/// `1 binding`, `3 bindings`
pub fn count(n: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { plural })
}

pub fn print_success(msg: &str) {
    if VerbosityLevel::Normal.should_output() {
        println!("{}", OutputStyle::default().success(msg));
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{}", OutputStyle::default().error(msg));
}

pub fn print_warning(msg: &str) {
    eprintln!("{}", OutputStyle::default().warning(msg));
}

pub fn print_info(msg: &str) {
    if VerbosityLevel::Normal.should_output() {
        println!("{}", OutputStyle::default().info(msg));
    }
}
