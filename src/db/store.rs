//! Append-only location store.

use crate::namespace::NamespaceName;
use crate::types::{LocationId, LocationRecord};
use bytes::Bytes;
use std::sync::Arc;

/// A validated location waiting for its identifier.
#[derive(Debug, Clone)]
pub(crate) struct PreparedLocation {
    pub(crate) geohash: u64,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) properties: Option<Bytes>,
    pub(crate) namespace: Option<NamespaceName>,
}

impl PreparedLocation {
    fn into_record(self, id: LocationId) -> LocationRecord {
        LocationRecord {
            id,
            geohash: self.geohash,
            latitude: self.latitude,
            longitude: self.longitude,
            properties: self.properties,
            namespace: self.namespace,
        }
    }
}

/// Records in insertion order; a record's identifier is its position.
///
/// `generation` is bumped by every committed append and is what the sorted
/// snapshot compares against to decide whether it is stale.
#[derive(Debug, Default)]
pub(crate) struct LocationStore {
    records: Vec<Arc<LocationRecord>>,
    generation: u64,
}

impl LocationStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            generation: 0,
        }
    }

    pub(crate) fn append(&mut self, location: PreparedLocation) -> LocationId {
        let id = self.next_id();
        self.records.push(Arc::new(location.into_record(id)));
        self.generation += 1;
        id
    }

    /// Append every location with consecutive identifiers as one mutation.
    pub(crate) fn append_all(&mut self, locations: Vec<PreparedLocation>) -> Vec<LocationId> {
        if locations.is_empty() {
            return Vec::new();
        }

        self.records.reserve(locations.len());
        let ids = locations
            .into_iter()
            .map(|location| {
                let id = self.next_id();
                self.records.push(Arc::new(location.into_record(id)));
                id
            })
            .collect();
        self.generation += 1;
        ids
    }

    pub(crate) fn get(&self, id: LocationId) -> Option<&Arc<LocationRecord>> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.records.get(index))
    }

    pub(crate) fn records(&self) -> &[Arc<LocationRecord>] {
        &self.records
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    fn next_id(&self) -> LocationId {
        LocationId::new(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(geohash: u64) -> PreparedLocation {
        PreparedLocation {
            geohash,
            latitude: 0.0,
            longitude: 0.0,
            properties: None,
            namespace: None,
        }
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut store = LocationStore::default();
        assert_eq!(store.append(prepared(5)), LocationId::new(0));
        assert_eq!(store.append(prepared(1)), LocationId::new(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.generation(), 2);
        assert_eq!(store.get(LocationId::new(1)).unwrap().geohash(), 1);
        assert!(store.get(LocationId::new(2)).is_none());
    }

    #[test]
    fn test_append_all_bumps_generation_once() {
        let mut store = LocationStore::with_capacity(4);
        store.append(prepared(9));
        let ids = store.append_all(vec![prepared(1), prepared(2), prepared(3)]);
        assert_eq!(
            ids,
            vec![LocationId::new(1), LocationId::new(2), LocationId::new(3)]
        );
        assert_eq!(store.generation(), 2);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_append_all_empty_is_noop() {
        let mut store = LocationStore::default();
        assert!(store.append_all(Vec::new()).is_empty());
        assert_eq!(store.generation(), 0);
    }
}
