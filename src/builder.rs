//! Index builder for flexible configuration
//!
//! This module provides a builder pattern for creating a [`GeoIndex`] with
//! custom configuration or a custom geohash codec.

use crate::compute::geohash::{GeohashCodec, Wgs84Codec};
use crate::config::Config;
use crate::db::GeoIndex;
use crate::error::{GeoIndexError, Result};
use crate::logging::set_debug_logging;

/// Builder for index configuration and codec selection.
#[derive(Debug)]
pub struct GeoIndexBuilder<C = Wgs84Codec> {
    config: Config,
    codec: C,
}

impl GeoIndexBuilder<Wgs84Codec> {
    /// Create a new builder with default configuration and the WGS84 codec.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            codec: Wgs84Codec,
        }
    }
}

impl<C: GeohashCodec> GeoIndexBuilder<C> {
    /// Set the index configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Switch the process-wide debug logging toggle on when the index is built.
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.config.debug_logging = enabled;
        self
    }

    /// Reserve room for `capacity` locations up front.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Use a different geohash codec.
    pub fn codec<D: GeohashCodec>(self, codec: D) -> GeoIndexBuilder<D> {
        GeoIndexBuilder {
            config: self.config,
            codec,
        }
    }

    /// Build the index. Fails with `Config` if the configuration is invalid.
    pub fn build(self) -> Result<GeoIndex<C>> {
        self.config.validate().map_err(GeoIndexError::Config)?;

        if self.config.debug_logging {
            set_debug_logging(true);
        }

        Ok(GeoIndex::from_parts(self.config, self.codec))
    }
}

impl Default for GeoIndexBuilder<Wgs84Codec> {
    fn default() -> Self {
        Self::new()
    }
}
