//! Configuration management for Neurosim
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::catalog::PresetCatalog;
use crate::error::{NeurosimError, Result};
use crate::session::SessionDelays;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for Neurosim
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Conversation session behavior
    #[serde(default)]
    pub session: SessionConfig,

    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Conversation session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Simulated response latency in milliseconds
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,

    /// Auto-clear interval for the saved/copied flag in milliseconds
    #[serde(default = "default_flag_reset_ms")]
    pub flag_reset_ms: u64,

    /// Preset selected when a session starts
    #[serde(default = "default_preset")]
    pub default_preset: String,
}

fn default_response_delay_ms() -> u64 {
    1000
}

fn default_flag_reset_ms() -> u64 {
    2000
}

fn default_preset() -> String {
    "dall-e-3".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            flag_reset_ms: default_flag_reset_ms(),
            default_preset: default_preset(),
        }
    }
}

impl SessionConfig {
    /// Session delays as durations
    pub fn delays(&self) -> SessionDelays {
        SessionDelays {
            response_delay: Duration::from_millis(self.response_delay_ms),
            flag_reset_delay: Duration::from_millis(self.flag_reset_ms),
        }
    }
}

/// Interactive chat configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatConfig {
    /// Directory where saved attachments land; defaults to the user's
    /// download directory
    #[serde(default)]
    pub save_dir: Option<String>,
}

impl ChatConfig {
    /// Resolves the save directory
    ///
    /// Uses the configured directory when set, the platform download
    /// directory otherwise, and `./neurosim-saves` as a last resort.
    pub fn resolve_save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_dir {
            return PathBuf::from(dir);
        }
        UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("neurosim-saves"))
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NeurosimError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| NeurosimError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(delay) = std::env::var("NEUROSIM_RESPONSE_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.session.response_delay_ms = value;
            } else {
                tracing::warn!("Invalid NEUROSIM_RESPONSE_DELAY_MS: {}", delay);
            }
        }

        if let Ok(reset) = std::env::var("NEUROSIM_FLAG_RESET_MS") {
            if let Ok(value) = reset.parse() {
                self.session.flag_reset_ms = value;
            } else {
                tracing::warn!("Invalid NEUROSIM_FLAG_RESET_MS: {}", reset);
            }
        }

        if let Ok(preset) = std::env::var("NEUROSIM_DEFAULT_PRESET") {
            self.session.default_preset = preset;
        }

        if let Ok(dir) = std::env::var("NEUROSIM_SAVE_DIR") {
            self.chat.save_dir = Some(dir);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        use crate::cli::Commands;

        match &cli.command {
            Commands::Chat { preset, .. } | Commands::Ask { preset, .. } => {
                if let Some(preset) = preset {
                    self.session.default_preset = preset.clone();
                }
            }
            Commands::Presets { .. } => {}
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error when a delay is zero or the default preset id does not
    /// name a built-in preset (custom presets cannot exist at startup)
    pub fn validate(&self) -> Result<()> {
        if self.session.response_delay_ms == 0 {
            return Err(
                NeurosimError::Config("session.response_delay_ms must be positive".to_string())
                    .into(),
            );
        }
        if self.session.flag_reset_ms == 0 {
            return Err(
                NeurosimError::Config("session.flag_reset_ms must be positive".to_string()).into(),
            );
        }
        if self.session.default_preset.trim().is_empty() {
            return Err(
                NeurosimError::Config("session.default_preset must not be empty".to_string())
                    .into(),
            );
        }
        if !PresetCatalog::new().contains(&self.session.default_preset) {
            return Err(NeurosimError::Config(format!(
                "session.default_preset '{}' is not a known preset",
                self.session.default_preset
            ))
            .into());
        }
        Ok(())
    }
}
