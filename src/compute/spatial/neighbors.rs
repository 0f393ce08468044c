//! Neighbor cell lookup and normalization to maximum-precision hash ranges.

use crate::compute::geohash::{GeohashCodec, MAX_STEPS};
use crate::logging::geo_debug;
use smallvec::SmallVec;

/// Steps at or below which neighbor cells can coincide and are deduplicated.
pub const DEDUPE_MAX_STEPS: u8 = 6;

/// Half-open range `[lower, upper)` of maximum-precision hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashRange {
    pub lower: u64,
    pub upper: u64,
}

impl HashRange {
    /// All maximum-precision hashes nested under the cell `bits` at `step`.
    pub fn for_cell(bits: u64, step: u8) -> Self {
        let shift = 2 * u32::from(MAX_STEPS - step);
        Self {
            lower: bits << shift,
            upper: (bits + 1) << shift,
        }
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.lower <= hash && hash < self.upper
    }
}

/// Ranges for the cell holding a query point and its neighbors.
pub type NeighborRanges = SmallVec<[HashRange; 9]>;

/// Resolve the nine neighbor cells around a point at `step` into hash ranges.
///
/// Cells that coincide at coarse precision are collapsed, so the returned
/// ranges never overlap.
pub fn neighbor_ranges<C: GeohashCodec + ?Sized>(
    codec: &C,
    latitude: f64,
    longitude: f64,
    step: u8,
) -> NeighborRanges {
    let center = codec.encode(latitude, longitude, step);
    let mut cells: SmallVec<[u64; 9]> = SmallVec::from_buf(codec.neighbors(center, step).to_array());

    if step <= DEDUPE_MAX_STEPS {
        // Keep first occurrences so the scan order stays center-first.
        let mut seen: SmallVec<[u64; 9]> = SmallVec::new();
        cells.retain(|cell| {
            if seen.contains(cell) {
                false
            } else {
                seen.push(*cell);
                true
            }
        });
    }

    cells
        .into_iter()
        .map(|cell| {
            let range = HashRange::for_cell(cell, step);
            geo_debug!(
                "neighbor cell {} at step {} -> [{}, {}) {:?}",
                cell,
                step,
                range.lower,
                range.upper,
                codec.decode(cell, step)
            );
            range
        })
        .collect()
}
