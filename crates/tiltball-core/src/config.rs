use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "TILTBALL_CONFIG";
/// Config path used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/tiltball.toml";

/// Settings for driving a ball from recorded or generated samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    /// Time step for samples that do not carry one (seconds).
    pub default_dt: f32,
    /// Number of ticks produced by the synthetic sample generator.
    pub synthetic_ticks: u32,
    /// Seed for the synthetic sample generator.
    pub seed: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            default_dt: 1.0 / 60.0,
            synthetic_ticks: 600,
            seed: 0,
        }
    }
}

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TiltballConfig {
    pub field: Field,
    pub replay: ReplayConfig,
}

impl TiltballConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from `$TILTBALL_CONFIG` or `config/tiltball.toml`. Falls back
    /// to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!(path, "Loaded configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::debug!(path, "No config file found, using defaults");
                Self::default()
            },
        }
    }
}
