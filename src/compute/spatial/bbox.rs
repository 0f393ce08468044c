//! Approximate lat/lon rectangle used to trim geohash candidates.

use serde::{Deserialize, Serialize};

/// Kilometers per degree of latitude.
pub const KM_PER_DEGREE_LAT: f64 = 110.574;

/// Kilometers per degree of longitude at the equator.
pub const KM_PER_DEGREE_LON: f64 = 111.320;

/// Axis-aligned box around a search center.
///
/// Built from fixed degree-per-kilometer factors, so it ignores polar
/// flattening, degenerates near the poles and does not wrap across the
/// antimeridian. The min/max pairs may come out inverted; [`contains`]
/// accepts either order on each axis.
///
/// [`contains`]: SearchBox::contains
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl SearchBox {
    /// Box spanning `radius_km` in every direction from the center.
    ///
    /// The longitude span takes `cos` of the latitude value as given.
    pub fn around(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        let lat_diff = radius_km / KM_PER_DEGREE_LAT;
        let lon_diff = radius_km / (KM_PER_DEGREE_LON * latitude.cos());

        Self {
            min_lat: latitude - lat_diff,
            max_lat: latitude + lat_diff,
            min_lon: longitude - lon_diff,
            max_lon: longitude + lon_diff,
        }
    }

    /// Whether the coordinate lies inside the box, edges inclusive.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        between(latitude, self.min_lat, self.max_lat)
            && between(longitude, self.min_lon, self.max_lon)
    }
}

fn between(value: f64, a: f64, b: f64) -> bool {
    (value >= a && value <= b) || (value <= a && value >= b)
}
