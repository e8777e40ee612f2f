//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::ManagerConfig,
};

/// Prefix of environment variables overriding the file, e.g. `KEYSYNC_FOLDER`
pub const ENV_PREFIX: &str = "KEYSYNC";

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keysync")
            .join("config.toml")
    }

    /// Load the file (if any) and apply environment overrides
    ///
    /// `<PREFIX>_FILES` takes a comma-separated list.
    pub fn load_config(&self) -> Result<ManagerConfig> {
        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .try_parsing(true)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("files"),
            );

        let config = builder.build()?;
        let mut manager_config: ManagerConfig = config.try_deserialize()?;
        manager_config
            .files
            .retain(|entry| !entry.trim().is_empty());

        debug!("Loaded configuration from {}", self.config_path.display());
        Ok(manager_config)
    }

    pub fn save_config(&self, config: &ManagerConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        debug!("Saved configuration to {}", self.config_path.display());
        Ok(())
    }

    pub fn validate_config(&self, config: &ManagerConfig) -> Result<()> {
        let pattern = config.file_pattern.trim();
        if pattern.is_empty() {
            return Err(ConfigError::Validation(
                "File pattern must not be empty".to_string(),
            ));
        }
        if let Err(e) = glob::Pattern::new(pattern) {
            return Err(ConfigError::Validation(format!(
                "File pattern '{}' is not a valid glob: {}",
                pattern, e
            )));
        }
        if config.backup_retention == Some(0) {
            return Err(ConfigError::Validation(
                "Backup retention must be greater than 0".to_string(),
            ));
        }
        if config.files.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "Configured file entries must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load then validate
    pub fn load_validated(&self) -> Result<ManagerConfig> {
        let config = self.load_config()?;
        self.validate_config(&config)?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
