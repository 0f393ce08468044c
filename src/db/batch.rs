//! Atomic batch insertion.

use super::GeoIndex;
use super::store::PreparedLocation;
use crate::compute::geohash::GeohashCodec;
use crate::error::Result;
use crate::types::{Location, LocationId};

/// Atomic batch. Every queued location is committed, or none is.
///
/// Locations are validated as they are queued; the batch is committed with
/// a single acquisition of the store lock once the closure passed to
/// [`GeoIndex::atomic`] returns `Ok`.
pub struct AtomicBatch<'a, C: GeohashCodec> {
    index: &'a GeoIndex<C>,
    pending: Vec<PreparedLocation>,
}

impl<'a, C: GeohashCodec> AtomicBatch<'a, C> {
    pub(crate) fn new(index: &'a GeoIndex<C>) -> Self {
        Self {
            index,
            pending: Vec::new(),
        }
    }

    /// Queue a location. Fails with `InvalidInput` under the same rules as
    /// [`GeoIndex::add`]; a rejected location is not queued.
    pub fn add(&mut self, location: Location) -> Result<()> {
        let prepared = self.index.prepare_location(location)?;
        self.pending.push(prepared);
        Ok(())
    }

    /// Number of queued locations.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn commit(self) -> Vec<LocationId> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        self.index.store.lock().append_all(self.pending)
    }
}
