//! Configuration for pronoun-chat
//!
//! Supports loading configuration from:
//! 1. CLI --config argument
//! 2. ~/.config/pronoun-chat/config.{PRONOUN_CHAT_ENV}.json
//! 3. Default values
//!
//! Where PRONOUN_CHAT_ENV can be: production (default), development, test
//!
//! # Examples
//!
//! ```no_run
//! use pronoun_chat::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(None)?;
//! println!("History lives in {}", config.db_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variables
//!
//! Environment variables override config file values:
//! - PRONOUN_CHAT_DB
//! - PRONOUN_CHAT_LOG
//! - PRONOUN_CHAT_DEBUG

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database holding pronouns and chat history
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Plain-text mirror of the chat history
    #[serde(default = "default_chat_log_path")]
    pub chat_log_path: PathBuf,

    /// Operator diagnostics file used while the TUI owns the terminal
    #[serde(default = "default_diagnostics_log_path")]
    pub diagnostics_log_path: PathBuf,

    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("chat.db")
}

fn default_chat_log_path() -> PathBuf {
    PathBuf::from("chat_log.txt")
}

fn default_diagnostics_log_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("pronoun-chat").join("pronoun-chat.log"))
        .unwrap_or_else(|| PathBuf::from("pronoun-chat.log"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            chat_log_path: default_chat_log_path(),
            diagnostics_log_path: default_diagnostics_log_path(),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration with standard priority:
    /// 1. Explicit path
    /// 2. ~/.config/pronoun-chat/config.{PRONOUN_CHAT_ENV}.json
    /// 3. Defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            if path.exists() {
                tracing::info!("Loading config from: {:?}", path);
                return Self::from_file(path);
            } else {
                return Err(ConfigError::ValidationError(format!(
                    "Config file not found: {:?}",
                    path
                )));
            }
        }

        let env = std::env::var("PRONOUN_CHAT_ENV").unwrap_or_else(|_| "production".to_string());

        if let Some(config_dir) = Self::config_dir() {
            let config_path = config_dir.join(format!("config.{}.json", env));

            if config_path.exists() {
                tracing::info!("Loading config from: {:?}", config_path);
                return Self::from_file(&config_path);
            }
        }

        tracing::info!("Using default configuration with environment overrides");
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PRONOUN_CHAT_DB") {
            self.db_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("PRONOUN_CHAT_LOG") {
            self.chat_log_path = PathBuf::from(path);
        }

        if let Ok(debug) = std::env::var("PRONOUN_CHAT_DEBUG") {
            self.debug = parse_flag(&debug);
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "db_path cannot be empty".to_string(),
            ));
        }

        if self.chat_log_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "chat_log_path cannot be empty".to_string(),
            ));
        }

        if self.db_path == self.chat_log_path {
            return Err(ConfigError::ValidationError(
                "db_path and chat_log_path must differ".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pronoun-chat"))
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1" || value.eq_ignore_ascii_case("yes")
}
