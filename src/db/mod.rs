//! Core geo index implementation.
//!
//! This module defines the [`GeoIndex`] type: an append-only location store,
//! a lazily rebuilt geohash-sorted snapshot of it, and the radius search that
//! ties the compute layer together.

use crate::builder::GeoIndexBuilder;
use crate::compute::geohash::{GeohashCodec, MAX_STEPS, Wgs84Codec};
use crate::compute::spatial::{SearchBox, estimate_steps, neighbor_ranges, scan};
use crate::compute::validation::validate_coordinates;
use crate::config::Config;
use crate::error::{GeoIndexError, Result};
use crate::logging::geo_debug;
use crate::namespace::NamespaceName;
use crate::types::{IndexState, IndexStats, Location, LocationId, LocationKey, LocationRecord};
use geo::Point;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

mod batch;
mod snapshot;
mod store;

pub use batch::AtomicBatch;

use snapshot::HashIndex;
use store::{LocationStore, PreparedLocation};

/// In-memory geospatial proximity index.
///
/// Locations are appended to a store and receive sequential identifiers.
/// Searches run against a copy of the store sorted by geohash, which is
/// rebuilt on the first search after any add.
///
/// # Thread Safety
///
/// `GeoIndex` is `Send + Sync`; share it with `Arc`. Adds are serialized by a
/// store lock, so identifiers are never duplicated. Searches clone the
/// current sorted snapshot and scan it without holding any lock. A search
/// racing with an add may or may not see the new location.
///
/// # Examples
///
/// ```rust
/// use geoindex::{GeoIndex, Location};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let index = GeoIndex::new();
///
/// let palermo = index.add(Location::new(38.115556, 13.361389).with_properties("Palermo"))?;
/// let catania = index.add(Location::new(37.502669, 15.087269).with_properties("Catania"))?;
/// assert_eq!(palermo.get(), 0);
/// assert_eq!(catania.get(), 1);
///
/// let nearby = index.search(38.115556, 13.361389, 165.0);
/// assert_eq!(nearby.len(), 1);
///
/// let wider = index.search(38.115556, 13.361389, 180.0);
/// assert_eq!(wider.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct GeoIndex<C: GeohashCodec = Wgs84Codec> {
    config: Config,
    codec: C,
    store: Mutex<LocationStore>,
    snapshot: RwLock<Arc<HashIndex>>,
    rebuilds: AtomicU64,
}

impl GeoIndex<Wgs84Codec> {
    /// Creates an empty index with default configuration.
    pub fn new() -> Self {
        Self::from_parts(Config::default(), Wgs84Codec)
    }

    /// Creates an empty index with custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        GeoIndexBuilder::new().config(config).build()
    }

    /// Builder for custom configuration or codecs.
    pub fn builder() -> GeoIndexBuilder {
        GeoIndexBuilder::new()
    }
}

impl Default for GeoIndex<Wgs84Codec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: GeohashCodec> GeoIndex<C> {
    pub(crate) fn from_parts(config: Config, codec: C) -> Self {
        let store = LocationStore::with_capacity(config.initial_capacity);
        Self {
            config,
            codec,
            store: Mutex::new(store),
            snapshot: RwLock::new(Arc::new(HashIndex::default())),
            rebuilds: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    // ===== Store =====

    /// Adds a location and returns its identifier.
    ///
    /// Fails with `InvalidInput` if the location carries a generated field
    /// (`id` or `geohash`), has invalid coordinates, or an invalid namespace.
    /// A failed add leaves the index unchanged.
    pub fn add(&self, location: Location) -> Result<LocationId> {
        let prepared = self.prepare_location(location)?;
        let geohash = prepared.geohash;
        let id = self.store.lock().append(prepared);
        geo_debug!("added location {} with geohash {}", id, geohash);
        Ok(id)
    }

    /// Adds several locations atomically.
    ///
    /// The closure queues locations on the batch. If it returns an error,
    /// nothing is added. Otherwise all queued locations are added with
    /// consecutive identifiers, which are returned in queue order.
    ///
    /// ```rust
    /// use geoindex::{GeoIndex, Location};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let index = GeoIndex::new();
    /// let ids = index.atomic(|batch| {
    ///     batch.add(Location::new(51.5074, -0.1278))?;
    ///     batch.add(Location::new(48.8566, 2.3522))?;
    ///     Ok(())
    /// })?;
    /// assert_eq!(ids.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn atomic<F>(&self, f: F) -> Result<Vec<LocationId>>
    where
        F: FnOnce(&mut AtomicBatch<'_, C>) -> Result<()>,
    {
        let mut batch = AtomicBatch::new(self);
        f(&mut batch)?;
        let ids = batch.commit();
        geo_debug!("committed batch of {} locations", ids.len());
        Ok(ids)
    }

    /// Gets the location stored under `id`.
    pub fn get(&self, id: LocationId) -> Result<Arc<LocationRecord>> {
        let store = self.store.lock();
        store.get(id).cloned().ok_or_else(|| {
            GeoIndexError::NotFound(format!(
                "Location {} is out of range (stored: {})",
                id,
                store.len()
            ))
        })
    }

    /// Gets a location by its composite `<geohash>-<id>` key.
    ///
    /// Malformed keys, unknown identifiers and keys whose geohash does not
    /// match the stored record all fail with `NotFound`.
    pub fn get_by_key(&self, key: &str) -> Result<Arc<LocationRecord>> {
        let parsed: LocationKey = key.parse()?;
        let record = self.get(parsed.id)?;
        if record.geohash() != parsed.geohash {
            return Err(GeoIndexError::NotFound(format!(
                "Location key '{}' does not match location {}",
                key, parsed.id
            )));
        }
        Ok(record)
    }

    /// Number of stored locations.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ===== Index =====

    /// Whether the sorted index reflects every stored location.
    pub fn index_state(&self) -> IndexState {
        let indexed = self.snapshot.read().generation();
        if self.store.lock().generation() == indexed {
            IndexState::Fresh
        } else {
            IndexState::Stale
        }
    }

    /// Rebuilds the sorted index now if it is stale.
    ///
    /// Searches do this on demand; calling it after a bulk load moves the
    /// sort cost out of the first search.
    pub fn prepare(&self) {
        self.ensure_fresh();
    }

    pub fn stats(&self) -> IndexStats {
        let snapshot = self.snapshot.read().clone();
        let (record_count, generation) = {
            let store = self.store.lock();
            (store.len(), store.generation())
        };

        IndexStats {
            record_count,
            indexed_count: snapshot.len(),
            state: if generation == snapshot.generation() {
                IndexState::Fresh
            } else {
                IndexState::Stale
            },
            rebuild_count: self.rebuilds.load(Ordering::Relaxed),
        }
    }

    // ===== Search =====

    /// Finds stored locations within `radius_km` of the given point.
    ///
    /// Candidates come from the geohash cells around the point and are
    /// trimmed by an approximate bounding box (see
    /// [`SearchBox`](crate::compute::spatial::SearchBox)), so the result is a
    /// rectangle rather than a circle. Results are not sorted by distance.
    /// Negative or NaN radii are treated as zero.
    pub fn search(&self, latitude: f64, longitude: f64, radius_km: f64) -> Vec<Arc<LocationRecord>> {
        self.search_filtered(latitude, longitude, radius_km, |_| true)
    }

    /// [`search`](Self::search) taking a `geo::Point` (x = longitude, y = latitude).
    pub fn search_point(&self, center: &Point, radius_km: f64) -> Vec<Arc<LocationRecord>> {
        self.search(center.y(), center.x(), radius_km)
    }

    /// [`search`](Self::search) restricted to locations tagged with `namespace`.
    pub fn search_namespace(
        &self,
        namespace: &str,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Vec<Arc<LocationRecord>> {
        self.search_filtered(latitude, longitude, radius_km, |record| {
            record
                .namespace()
                .is_some_and(|tag| tag.as_str() == namespace)
        })
    }

    /// Searches around the location identified by a composite key.
    ///
    /// Fails with `NotFound` if the key does not resolve; no partial results
    /// are returned in that case.
    pub fn search_around(&self, key: &str, radius_km: f64) -> Result<Vec<Arc<LocationRecord>>> {
        let center = self.get_by_key(key)?;
        Ok(self.search(center.latitude(), center.longitude(), radius_km))
    }

    fn search_filtered<F>(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        keep: F,
    ) -> Vec<Arc<LocationRecord>>
    where
        F: Fn(&LocationRecord) -> bool,
    {
        let radius_km = radius_km.max(0.0);
        let index = self.ensure_fresh();

        let step = estimate_steps(radius_km * 1000.0);
        geo_debug!("hash step {} for radius {} km", step, radius_km);

        let ranges = neighbor_ranges(&self.codec, latitude, longitude, step);
        let bbox = SearchBox::around(latitude, longitude, radius_km);
        geo_debug!("search box {:?}", bbox);

        let mut found = Vec::with_capacity(self.config.result_capacity);
        scan(index.entries(), &ranges, |record| {
            if bbox.contains(record.latitude, record.longitude) && keep(record.as_ref()) {
                found.push(Arc::clone(record));
            }
        });

        geo_debug!(
            "search at ({}, {}) found {} of {} locations",
            latitude,
            longitude,
            found.len(),
            index.len()
        );
        found
    }

    /// Returns a snapshot sorted at the current store generation, rebuilding
    /// it if an add happened since the last one.
    ///
    /// The sort runs outside both locks. Concurrent callers may rebuild the
    /// same generation twice; the snapshot slot only ever moves forward.
    fn ensure_fresh(&self) -> Arc<HashIndex> {
        let current = self.snapshot.read().clone();

        let (records, generation) = {
            let store = self.store.lock();
            if store.generation() == current.generation() {
                return current;
            }
            (store.records().to_vec(), store.generation())
        };

        let rebuilt = Arc::new(HashIndex::build(generation, records));
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        geo_debug!(
            "rebuilt geohash index with {} locations at generation {}",
            rebuilt.len(),
            generation
        );

        let mut slot = self.snapshot.write();
        if slot.generation() < generation {
            *slot = Arc::clone(&rebuilt);
            rebuilt
        } else {
            Arc::clone(&slot)
        }
    }

    fn prepare_location(&self, location: Location) -> Result<PreparedLocation> {
        if location.id.is_some() || location.geohash.is_some() {
            return Err(GeoIndexError::InvalidInput(
                "id and geohash are generated by the index and must not be set".into(),
            ));
        }

        validate_coordinates(location.latitude, location.longitude)?;

        let namespace = location.namespace.map(NamespaceName::parse).transpose()?;

        Ok(PreparedLocation {
            geohash: self
                .codec
                .encode(location.latitude, location.longitude, MAX_STEPS),
            latitude: location.latitude,
            longitude: location.longitude,
            properties: location.properties,
            namespace,
        })
    }
}

impl<C: GeohashCodec> fmt::Debug for GeoIndex<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoIndex")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
