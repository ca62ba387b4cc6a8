//! Configuration loading for hanabira.
//!
//! Two sources feed the effect switches: the user's TOML config in the
//! platform config directory, and an optional JSON site config whose
//! `effects` object uses the same keys.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use hanabira_core::EffectsConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("invalid site config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine the config directory")]
    NoConfigDir,
}

/// User configuration, stored as `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Effect switches. `None` when the file has no `[effects]` table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectsConfig>,
    /// Fixed RNG seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Heading shown on the page below the overlay.
    pub title: String,
    /// Background color translucent particles are blended against.
    pub backdrop: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effects: None,
            seed: None,
            title: "hanabira".to_string(),
            backdrop: [0, 0, 0],
        }
    }
}

impl Config {
    /// Path of the user config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "hanabira")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load the user config, falling back to defaults if the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    effects: Option<EffectsConfig>,
}

/// Read the `effects` object from a JSON site config file.
pub fn load_site_effects(path: &Path) -> Result<Option<EffectsConfig>, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_site_effects(&content)
}

/// Read the `effects` object from JSON site config text.
///
/// Other top-level keys are ignored; a missing or `null` `effects` yields `None`.
pub fn parse_site_effects(content: &str) -> Result<Option<EffectsConfig>, ConfigError> {
    let site: SiteConfig = serde_json::from_str(content)?;
    Ok(site.effects)
}
