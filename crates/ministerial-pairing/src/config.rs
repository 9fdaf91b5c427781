//! Configuration for the pairing engine
//!
//! Defines the relationship-cache TTL and the minor age threshold.

use crate::PairingError;
use ministerial_domain::DEFAULT_MINOR_AGE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the pairing validator
///
/// # Examples
///
/// ```
/// use ministerial_pairing::PairingConfig;
///
/// let config = PairingConfig::default();
/// assert_eq!(config.cache_ttl_secs, 300);
/// assert_eq!(config.minor_age, 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingConfig {
    /// How long a relationship snapshot stays fresh (in seconds)
    /// Default: 300 (5 minutes)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Students younger than this are minors
    /// Default: 18
    #[serde(default = "default_minor_age")]
    pub minor_age: u32,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_minor_age() -> u32 {
    DEFAULT_MINOR_AGE
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            minor_age: default_minor_age(),
        }
    }
}

impl PairingConfig {
    /// Get the cache TTL as a Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PairingError> {
        if self.minor_age == 0 {
            return Err(PairingError::Config(
                "minor_age must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    ///
    /// Accepts either top-level keys or a `[pairing]` table.
    pub fn from_toml(toml_str: &str) -> Result<Self, PairingError> {
        #[derive(Deserialize)]
        struct Wrapped {
            pairing: PairingConfig,
        }

        let config = match toml::from_str::<Wrapped>(toml_str) {
            Ok(wrapped) => wrapped.pairing,
            Err(_) => toml::from_str::<PairingConfig>(toml_str)
                .map_err(|e| PairingError::Config(format!("Failed to parse TOML: {}", e)))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PairingError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PairingError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, PairingError> {
        toml::to_string_pretty(self)
            .map_err(|e| PairingError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
