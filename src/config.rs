//! Index configuration.
//!
//! Configuration is small and serializable so it can be loaded from JSON or,
//! with the `toml` feature, from TOML. The maximum geohash precision is not
//! configurable; see [`MAX_STEPS`](crate::compute::geohash::MAX_STEPS).

use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Upper bound for the capacity hints below.
const MAX_CAPACITY_HINT: usize = 1 << 28;

/// Geo index configuration
///
/// # Example
///
/// ```rust
/// use geoindex::Config;
///
/// let config = Config::default();
/// assert!(!config.debug_logging);
///
/// let json = r#"{
///     "debug_logging": true,
///     "initial_capacity": 50000
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.initial_capacity, 50000);
/// assert_eq!(config.result_capacity, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Switch the process-wide debug logging toggle on when the index is built
    #[serde(default)]
    pub debug_logging: bool,

    /// Number of records to reserve room for up front
    #[serde(default)]
    pub initial_capacity: usize,

    /// Initial capacity of each search result vector
    #[serde(default = "Config::default_result_capacity")]
    pub result_capacity: usize,
}

impl Config {
    const fn default_result_capacity() -> usize {
        128
    }

    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_result_capacity(mut self, capacity: usize) -> Self {
        self.result_capacity = capacity;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_capacity > MAX_CAPACITY_HINT {
            return Err(format!(
                "Initial capacity must not exceed {}",
                MAX_CAPACITY_HINT
            ));
        }

        if self.result_capacity > MAX_CAPACITY_HINT {
            return Err(format!(
                "Result capacity must not exceed {}",
                MAX_CAPACITY_HINT
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug_logging: false,
            initial_capacity: 0,
            result_capacity: Self::default_result_capacity(),
        }
    }
}
