//! Proximity search building blocks: precision estimation, neighbor ranges,
//! sorted range scans and the bounding-box filter.

pub mod bbox;
pub mod estimate;
pub mod neighbors;
pub mod scan;

pub use bbox::SearchBox;
pub use estimate::{MERCATOR_MAX, estimate_steps};
pub use neighbors::{DEDUPE_MAX_STEPS, HashRange, NeighborRanges, neighbor_ranges};
pub use scan::{Hashed, lower_bound, scan, scan_range};
