//! Startup configuration
//!
//! Native builds read a JSON file named by `GALAXY_CONFIG`; the browser
//! build reads a JSON string from `window.__galaxy_config`. Every field is
//! optional. Anything invalid is reported and the defaults are used.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ConfigError;
use super::params::GalaxyParams;

/// Environment variable naming the native config file
pub const CONFIG_ENV: &str = "GALAXY_CONFIG";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalaxyConfig {
    /// Initial panel values
    pub params: GalaxyParams,
    /// Fixed RNG seed for reproducible galaxies
    pub seed: Option<u64>,
}

impl GalaxyConfig {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GalaxyConfig = serde_json::from_str(json)?;
        config.params.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Use `result` if it is valid, otherwise warn and fall back to defaults
    pub fn or_default(result: Result<Self, ConfigError>, source: &str) -> Self {
        match result {
            Ok(config) => {
                info!(source, seed = ?config.seed, stars = config.params.point_count, "Config loaded");
                config
            }
            Err(e) => {
                warn!(source, error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve the native config: `$GALAXY_CONFIG` if set, defaults otherwise
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::or_default(Self::load(&path), &path),
            Err(_) => Self::default(),
        }
    }
}
