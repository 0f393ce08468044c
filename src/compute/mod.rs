//! Compute layer for encoding and query processing.
//!
//! This module separates the search algorithms from storage concerns:
//! - Geohash encoding and neighbor lookup
//! - Coordinate validation
//! - Radius estimation, range resolution, scanning and box filtering
//!
//! Everything here is pure and operates on borrowed data.

pub mod geohash;
pub mod spatial;
pub mod validation;

pub use geohash::{CellArea, GeohashCodec, MAX_STEPS, Neighbors, Wgs84Codec};
