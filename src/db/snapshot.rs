//! Geohash-sorted snapshot of the store.

use crate::types::LocationRecord;
use std::sync::Arc;

/// Immutable copy of the store ordered by ascending geohash.
///
/// Built wholesale from the store at a given generation and never updated in
/// place; a newer store generation means a new snapshot.
#[derive(Debug, Default)]
pub(crate) struct HashIndex {
    generation: u64,
    entries: Vec<Arc<LocationRecord>>,
}

impl HashIndex {
    /// Stable-sort `records` by geohash; equal hashes keep insertion order.
    pub(crate) fn build(generation: u64, mut records: Vec<Arc<LocationRecord>>) -> Self {
        records.sort_by_key(|record| record.geohash());
        Self {
            generation,
            entries: records,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn entries(&self) -> &[Arc<LocationRecord>] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
