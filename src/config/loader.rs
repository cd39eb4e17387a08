use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Failure to obtain a usable [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`].
    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Parsed values are out of range.
    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Default location: `async-reducer/config.toml` under the platform
    /// config directory, or the working directory when there is none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("async-reducer").join("config.toml")
    }

    /// Parse the default config file without validating it.
    ///
    /// An absent file is not an error: the demo runs on built-in defaults.
    pub fn read() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::read_from(&path)
    }

    /// Parse the config file at `path` without validating it.
    ///
    /// Callers that layer overrides (such as `reducer-demo` flags) on top
    /// of the file use this and call [`validate`](Self::validate) once the
    /// final values are in place.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// [`read`](Self::read) followed by [`validate`](Self::validate).
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::read()?;
        config.validate()?;
        Ok(config)
    }

    /// [`read_from`](Self::read_from) followed by [`validate`](Self::validate).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - The log filter is not empty
    /// - At least one demo delta is configured
    /// - The per-unit delay is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "logging.filter must not be empty".to_string(),
            });
        }

        if self.demo.deltas.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "demo.deltas must contain at least one delta".to_string(),
            });
        }

        if self.demo.delay_per_unit_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "demo.delay_per_unit_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
