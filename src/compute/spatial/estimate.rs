//! Radius to geohash precision estimation.

use crate::compute::geohash::MAX_STEPS;

/// Ground span, in meters, of a step-1 cell under the WGS84 Mercator projection.
pub const MERCATOR_MAX: f64 = 20_037_726.37;

/// Finest step an estimate may produce before collapsing to [`MAX_STEPS`].
const FINEST_ESTIMATE: u8 = MAX_STEPS - 2;

/// Pick the geohash step count to scan for a search radius.
///
/// The radius is doubled once per step until it spans more than a step-1
/// cell; the step reached, minus one, is the estimate. Large radii give
/// coarse steps, small radii fine ones. Estimates that come out as zero or
/// finer than [`FINEST_ESTIMATE`] (radii up to roughly 1.2 m) use the
/// maximum precision.
///
/// # Examples
///
/// ```
/// use geoindex::compute::spatial::estimate_steps;
///
/// assert_eq!(estimate_steps(165_000.0), 7);
/// assert_eq!(estimate_steps(5_000.0), 12);
/// assert_eq!(estimate_steps(1.0), 26);
/// ```
pub fn estimate_steps(radius_meters: f64) -> u8 {
    let mut range = radius_meters;
    let mut step: u8 = 1;

    for _ in 0..MAX_STEPS {
        range *= 2.0;
        step += 1;
        if range < 0.0 || range > MERCATOR_MAX {
            break;
        }
    }

    step -= 1;
    if step == 0 || step > FINEST_ESTIMATE {
        return MAX_STEPS;
    }
    step
}
