//! Configuration model for lockfile.
//!
//! The lock path is the only thing a caller must supply; everything here has a
//! default. Config files are YAML, parsed forward-compatibly (unknown fields
//! are ignored) and validated after parsing.

use crate::error::{LockfileError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many stale or invalid lock files one `try_lock` call may remove
    /// before giving up with a contention error.
    #[serde(default = "default_max_reclaim_attempts")]
    pub max_reclaim_attempts: u32,

    /// Whether to fsync the temporary file before publishing it.
    #[serde(default = "default_true")]
    pub sync_on_write: bool,
}

fn default_max_reclaim_attempts() -> u32 {
    8
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_reclaim_attempts: default_max_reclaim_attempts(),
            sync_on_write: default_true(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockfileError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LockfileError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            LockfileError::Config(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `max_reclaim_attempts` must be positive, otherwise a single stale
    ///   lock file could never be cleared.
    pub fn validate(&self) -> Result<()> {
        if self.max_reclaim_attempts == 0 {
            return Err(LockfileError::Config(
                "config validation failed: max_reclaim_attempts must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
