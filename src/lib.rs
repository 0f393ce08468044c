//! Embedded in-memory geospatial proximity index.
//!
//! Locations are stored with a maximum-precision integer geohash and found
//! again with radius searches: the radius picks a geohash precision, the
//! nine cells around the query point become ranges over a geohash-sorted
//! snapshot, and the candidates are trimmed by an approximate bounding box.
//!
//! ```rust
//! use geoindex::{GeoIndex, Location};
//!
//! let index = GeoIndex::new();
//! let id = index.add(Location::new(38.115556, 13.361389).with_properties("Palermo"))?;
//!
//! let record = index.get(id)?;
//! assert_eq!(record.properties().map(|p| p.as_ref()), Some(&b"Palermo"[..]));
//!
//! let nearby = index.search(38.1, 13.35, 10.0);
//! assert_eq!(nearby.len(), 1);
//! # Ok::<(), geoindex::GeoIndexError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod namespace;
pub mod types;

pub use builder::GeoIndexBuilder;
pub use config::Config;
pub use db::{AtomicBatch, GeoIndex};
pub use error::{GeoIndexError, Result};

pub use compute::geohash::{CellArea, GeohashCodec, MAX_STEPS, Neighbors, Wgs84Codec};
pub use compute::spatial::{SearchBox, estimate_steps};

pub use logging::{debug_logging_enabled, set_debug_logging};

pub use namespace::NamespaceName;

pub use types::{IndexState, IndexStats, Location, LocationId, LocationKey, LocationRecord};

pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        Config, GeoIndex, GeoIndexBuilder, GeoIndexError, Location, LocationId, LocationRecord,
        Result,
    };

    pub use crate::{GeohashCodec, Wgs84Codec};

    pub use geo::Point;
}
