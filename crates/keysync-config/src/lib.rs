//! keysync Configuration Management
//!
//! Loads the merge settings (sources, folder, pattern, auto-sync, output
//! location) from a TOML file with `KEYSYNC_*` environment overrides, and
//! turns them into the inputs the keybinds crate works with.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::ManagerConfig;
