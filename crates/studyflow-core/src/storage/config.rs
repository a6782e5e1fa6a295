//! TOML-based application configuration.
//!
//! Stores planner defaults and narrative-generation settings.
//! Configuration is stored at `~/.config/studyflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Planner defaults applied when a user has no stored profile override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_block_minutes")]
    pub default_block_minutes: u32,
    #[serde(default = "default_max_blocks")]
    pub default_max_blocks_per_day: u32,
}

/// Narrative generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Model identifier passed to the generation endpoint.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the generation API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Hard timeout for one generation call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_block_minutes() -> u32 {
    45
}

fn default_max_blocks() -> u32 {
    3
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_block_minutes: default_block_minutes(),
            default_max_blocks_per_day: default_max_blocks(),
        }
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Write the configuration back to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_access_profile() {
        let config = Config::default();
        assert_eq!(config.planner.default_block_minutes, 45);
        assert_eq!(config.planner.default_max_blocks_per_day, 3);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [narrative]
            model = "gemini-2.0-pro"
            "#,
        )
        .unwrap();
        assert_eq!(config.narrative.model, "gemini-2.0-pro");
        assert_eq!(config.narrative.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.planner.default_max_blocks_per_day, 3);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.narrative.endpoint, config.narrative.endpoint);
        assert_eq!(back.narrative.timeout_secs, 20);
    }
}
