//! Integer geohash codec.
//!
//! A geohash here is a `u64` holding `step` bit pairs. Each pair carries one
//! longitude bit (the more significant) and one latitude bit, so a hash at a
//! coarse step is a numeric prefix of every hash nested beneath it:
//!
//! ```text
//! encode(p, s) == encode(p, MAX_STEPS) >> 2 * (MAX_STEPS - s)
//! ```
//!
//! The engine only talks to the codec through [`GeohashCodec`], so any
//! implementation that keeps that prefix property can be plugged in.

use serde::{Deserialize, Serialize};

/// Maximum (finest) precision, in bit pairs, used for stored hashes.
pub const MAX_STEPS: u8 = 26;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Bounds of a geohash cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellArea {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl CellArea {
    /// Whether the coordinate falls inside this cell (edges inclusive).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

/// A cell and its eight neighbors, all at the same precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbors {
    pub center: u64,
    pub north: u64,
    pub south: u64,
    pub east: u64,
    pub west: u64,
    pub north_east: u64,
    pub north_west: u64,
    pub south_east: u64,
    pub south_west: u64,
}

impl Neighbors {
    /// The nine cells in scan order: center, then N, E, W, S, NE, SE, NW, SW.
    pub fn to_array(&self) -> [u64; 9] {
        [
            self.center,
            self.north,
            self.east,
            self.west,
            self.south,
            self.north_east,
            self.south_east,
            self.north_west,
            self.south_west,
        ]
    }
}

/// Geohash primitives consumed by the index.
///
/// Implementations must be pure: the same inputs always give the same output.
/// `step` is in `1..=MAX_STEPS`.
pub trait GeohashCodec: Send + Sync {
    /// Encode a coordinate at `step` precision.
    fn encode(&self, latitude: f64, longitude: f64, step: u8) -> u64;

    /// Bounds of the cell `bits` at `step` precision.
    fn decode(&self, bits: u64, step: u8) -> CellArea;

    /// The cell `bits` and its eight neighbors at `step` precision.
    fn neighbors(&self, bits: u64, step: u8) -> Neighbors;
}

/// WGS84 interleaved-bit geohashing over the full latitude/longitude range.
///
/// Neighbor lookups wrap around on both axes, so the cells east of the
/// antimeridian and north of the top row are always distinct from the
/// center for `step >= 2`.
///
/// # Examples
///
/// ```rust
/// use geoindex::compute::geohash::{GeohashCodec, MAX_STEPS, Wgs84Codec};
///
/// let codec = Wgs84Codec;
/// let fine = codec.encode(38.115556, 13.361389, MAX_STEPS);
/// let coarse = codec.encode(38.115556, 13.361389, 7);
/// assert_eq!(fine >> (2 * (MAX_STEPS - 7) as u32), coarse);
///
/// let area = codec.decode(coarse, 7);
/// assert!(area.contains(38.115556, 13.361389));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wgs84Codec;

impl Wgs84Codec {
    fn quantize(value: f64, min: f64, max: f64, step: u8) -> u64 {
        let cells = 1u64 << step;
        let offset = (value - min) / (max - min);
        if offset.is_nan() || offset <= 0.0 {
            return 0;
        }
        // Scaling by a power of two is exact, so coarse indices stay prefixes of fine ones.
        let index = (offset * cells as f64) as u64;
        index.min(cells - 1)
    }

    fn shift_cell(index: u64, delta: i64, step: u8) -> u64 {
        let cells = 1i64 << step;
        (index as i64 + delta).rem_euclid(cells) as u64
    }
}

impl GeohashCodec for Wgs84Codec {
    fn encode(&self, latitude: f64, longitude: f64, step: u8) -> u64 {
        debug_assert!((1..=MAX_STEPS).contains(&step), "step out of range: {step}");

        let lat_index = Self::quantize(latitude, LAT_MIN, LAT_MAX, step);
        let lon_index = Self::quantize(longitude, LON_MIN, LON_MAX, step);
        interleave(lat_index, lon_index)
    }

    fn decode(&self, bits: u64, step: u8) -> CellArea {
        debug_assert!((1..=MAX_STEPS).contains(&step), "step out of range: {step}");

        let (lat_index, lon_index) = deinterleave(bits);
        let cells = (1u64 << step) as f64;
        let lat_span = (LAT_MAX - LAT_MIN) / cells;
        let lon_span = (LON_MAX - LON_MIN) / cells;

        let lat_min = LAT_MIN + lat_index as f64 * lat_span;
        let lon_min = LON_MIN + lon_index as f64 * lon_span;
        CellArea {
            lat_min,
            lat_max: lat_min + lat_span,
            lon_min,
            lon_max: lon_min + lon_span,
        }
    }

    fn neighbors(&self, bits: u64, step: u8) -> Neighbors {
        debug_assert!((1..=MAX_STEPS).contains(&step), "step out of range: {step}");

        let (lat_index, lon_index) = deinterleave(bits);
        let moved = |d_lat: i64, d_lon: i64| {
            interleave(
                Self::shift_cell(lat_index, d_lat, step),
                Self::shift_cell(lon_index, d_lon, step),
            )
        };

        Neighbors {
            center: bits,
            north: moved(1, 0),
            south: moved(-1, 0),
            east: moved(0, 1),
            west: moved(0, -1),
            north_east: moved(1, 1),
            north_west: moved(1, -1),
            south_east: moved(-1, 1),
            south_west: moved(-1, -1),
        }
    }
}

/// Spread the low 32 bits of `x` into the even bit positions.
fn spread(x: u64) -> u64 {
    let mut x = x & 0x0000_0000_FFFF_FFFF;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    (x | (x << 1)) & 0x5555_5555_5555_5555
}

/// Inverse of [`spread`].
fn squash(x: u64) -> u64 {
    let mut x = x & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF
}

fn interleave(lat_index: u64, lon_index: u64) -> u64 {
    spread(lat_index) | (spread(lon_index) << 1)
}

fn deinterleave(bits: u64) -> (u64, u64) {
    (squash(bits), squash(bits >> 1))
}
