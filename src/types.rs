//! Location records and the small value types around them.

use crate::compute::spatial::Hashed;
use crate::error::{GeoIndexError, Result};
use crate::namespace::NamespaceName;
use bytes::Bytes;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned to a location when it is added.
///
/// Identifiers are sequential from zero and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(u64);

impl LocationId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point submitted for indexing.
///
/// `id` and `geohash` are generated by the index and must be left unset;
/// [`GeoIndex::add`](crate::GeoIndex::add) rejects locations that carry them.
///
/// # Examples
///
/// ```rust
/// use geoindex::Location;
///
/// let palermo = Location::new(38.115556, 13.361389)
///     .with_properties("Palermo")
///     .with_namespace("cities");
/// assert!(palermo.id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub id: Option<LocationId>,
    pub geohash: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
    pub properties: Option<Bytes>,
    pub namespace: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Self::default()
        }
    }

    /// Location from a `geo::Point` (x = longitude, y = latitude).
    pub fn from_point(point: &Point) -> Self {
        Self::new(point.y(), point.x())
    }

    pub fn with_properties(mut self, properties: impl Into<Bytes>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// A stored, immutable location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub(crate) id: LocationId,
    pub(crate) geohash: u64,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) properties: Option<Bytes>,
    pub(crate) namespace: Option<NamespaceName>,
}

impl LocationRecord {
    pub fn id(&self) -> LocationId {
        self.id
    }

    /// Maximum-precision geohash of the location.
    pub fn geohash(&self) -> u64 {
        self.geohash
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn properties(&self) -> Option<&Bytes> {
        self.properties.as_ref()
    }

    pub fn namespace(&self) -> Option<&NamespaceName> {
        self.namespace.as_ref()
    }

    /// The location as a `geo::Point` (x = longitude, y = latitude).
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }

    /// Composite `<geohash>-<id>` key for this record.
    pub fn key(&self) -> LocationKey {
        LocationKey {
            geohash: self.geohash,
            id: self.id,
        }
    }

    /// Base32 geohash string of `len` characters (1-12).
    pub fn geohash_string(&self, len: usize) -> Result<String> {
        let coord = geohash::Coord {
            x: self.longitude,
            y: self.latitude,
        };
        geohash::encode(coord, len).map_err(|e| GeoIndexError::InvalidInput(e.to_string()))
    }
}

impl Hashed for LocationRecord {
    fn geohash(&self) -> u64 {
        self.geohash
    }
}

/// Composite lookup key made of a record's geohash and identifier.
///
/// Rendered as `<geohash>-<id>`, e.g. `3139639761105107-0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    pub geohash: u64,
    pub id: LocationId,
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.geohash, self.id)
    }
}

impl FromStr for LocationKey {
    type Err = GeoIndexError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || GeoIndexError::NotFound(format!("Malformed location key '{}'", s));

        let (hash, id) = s.split_once('-').ok_or_else(malformed)?;
        let geohash = hash.parse::<u64>().map_err(|_| malformed())?;
        let id = id.parse::<u64>().map_err(|_| malformed())?;

        Ok(Self {
            geohash,
            id: LocationId(id),
        })
    }
}

/// Freshness of the geohash-sorted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    /// The sorted index reflects every stored record.
    Fresh,
    /// Records were added since the last rebuild; the next search rebuilds.
    Stale,
}

/// Point-in-time index statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of stored records
    pub record_count: usize,
    /// Number of records in the current sorted snapshot
    pub indexed_count: usize,
    /// Whether the next search has to rebuild
    pub state: IndexState,
    /// Number of sorted snapshots built so far
    pub rebuild_count: u64,
}
