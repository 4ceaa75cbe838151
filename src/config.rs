//! Configuration module for kfs
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. The TOML config file (`~/.config/kfs/config.toml` on Linux, or `--config <FILE>`)
//! 3. `KFS_*` environment variables (`KFS_DATABASE_NAME`, `KFS_IGNORE=a,b`, ...)

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct KfsConfig {
    /// Name of the database looked up in the current directory and its ancestors
    pub database_name: String,

    /// Glob patterns, relative to the base directory, that `index` skips
    pub ignore: Vec<String>,

    /// Follow symbolic links while indexing
    pub follow_links: bool,

    /// Suppress informational output by default
    pub quiet: bool,
}

impl Default for KfsConfig {
    fn default() -> Self {
        Self {
            database_name: crate::DEFAULT_DB_NAME.to_string(),
            ignore: Vec::new(),
            follow_links: false,
            quiet: false,
        }
    }
}

impl KfsConfig {
    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("kfs").join("config.toml"))
    }

    /// Load configuration from the default config file, if present
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path, false)
    }

    /// Load configuration from `path`
    ///
    /// A missing file is only an error when `required` is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or if a
    /// setting fails validation.
    pub fn load_from(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("KFS")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("ignore"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let name = Path::new(&self.database_name);
        if self.database_name.is_empty()
            || name.components().count() != 1
            || name.file_name().is_none()
        {
            return Err(ConfigError::Message(format!(
                "database_name must be a plain file name, got '{}'",
                self.database_name
            )));
        }
        for pattern in &self.ignore {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Message(format!("Invalid ignore pattern '{pattern}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}
