//! Configuration management for TakeBridge
//!
//! Settings live in a single TOML file with an `[orchestrator]` and a
//! `[desktop]` section.

mod desktop;
mod orchestrator;
pub mod serde_utils;

pub use desktop::DesktopSettings;
pub use orchestrator::OrchestratorSettings;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Orchestration service settings
    pub orchestrator: OrchestratorSettings,
    /// Remote desktop settings
    pub desktop: DesktopSettings,
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match load_config(path) {
            Ok(settings) => Ok(settings),
            Err(ConfigError::NotFound(_)) => {
                tracing::debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("takebridge")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to a file
pub fn save_config<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConfigError::Invalid(format!("Failed to create config dir: {}", e)))?;
    }

    std::fs::write(path, content)
        .map_err(|e| ConfigError::Invalid(format!("Failed to write config: {}", e)))?;

    Ok(())
}
