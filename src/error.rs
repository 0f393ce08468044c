//! Error types for the geoindex engine.

use thiserror::Error;

/// Errors returned by [`GeoIndex`](crate::GeoIndex) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoIndexError {
    /// The caller supplied a location the index refuses to store
    /// (pre-populated generated fields, bad coordinates, bad namespace).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A lookup did not resolve to a stored location.
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration failed validation or could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GeoIndexError {
    fn from(err: serde_json::Error) -> Self {
        GeoIndexError::Config(err.to_string())
    }
}

/// Result type alias for geoindex operations
pub type Result<T> = std::result::Result<T, GeoIndexError>;
