use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "SSHFEED_CONFIG";

/// Environment variable overriding the wrapped program.
pub const PROGRAM_ENV: &str = "SSHFEED_PROGRAM";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `SSHFEED_CONFIG` wins when set. Otherwise uses
    /// `~/.config/sshfeed/config.toml` on Unix, or the platform equivalent
    /// via `dirs::config_dir()`, falling back to the current directory.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("sshfeed").join("config.toml")
    }

    /// Loads configuration from the default path and applies
    /// `SSHFEED_PROGRAM` on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_program_override(std::env::var(PROGRAM_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Replaces the program when an override is present and non-blank.
    pub fn apply_program_override(&mut self, program: Option<String>) {
        if let Some(program) = program.filter(|p| !p.trim().is_empty()) {
            self.program = program;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "program must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
