use geoindex::{
    GeoIndex, GeoIndexError, GeohashCodec, IndexState, Location, LocationId, MAX_STEPS, Point,
    Wgs84Codec, estimate_steps,
};
use std::collections::HashSet;

const PALERMO: (f64, f64) = (38.115556, 13.361389);
const CATANIA: (f64, f64) = (37.502669, 15.087269);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 60x60 grid of points around western Sicily.
fn add_grid(index: &GeoIndex) {
    index
        .atomic(|batch| {
            for row in 0..60 {
                for col in 0..60 {
                    let lat = 36.0 + row as f64 * 0.07;
                    let lon = 11.0 + col as f64 * 0.085;
                    batch.add(Location::new(lat, lon))?;
                }
            }
            Ok(())
        })
        .expect("Failed to load grid");
}

fn names(results: &[std::sync::Arc<geoindex::LocationRecord>]) -> Vec<String> {
    results
        .iter()
        .map(|r| String::from_utf8_lossy(r.properties().expect("properties")).into_owned())
        .collect()
}

#[test]
fn test_add_and_search_palermo_catania() {
    init_logging();
    let index = GeoIndex::new();

    let palermo = index
        .add(Location::new(PALERMO.0, PALERMO.1).with_properties("Palermo"))
        .expect("Failed to add Palermo");
    assert_eq!(palermo, LocationId::new(0));

    let catania = index
        .add(Location::new(CATANIA.0, CATANIA.1).with_properties("Catania"))
        .expect("Failed to add Catania");
    assert_eq!(catania, LocationId::new(1));

    let record = index.get(palermo).expect("Palermo not found");
    assert_eq!(record.latitude(), PALERMO.0);
    assert_eq!(record.longitude(), PALERMO.1);
    assert_eq!(record.properties().map(|p| p.as_ref()), Some(&b"Palermo"[..]));

    let record = index.get(catania).expect("Catania not found");
    assert_eq!(record.latitude(), CATANIA.0);
    assert_eq!(record.longitude(), CATANIA.1);

    // The cities are about 166 km apart.
    let results = index.search(PALERMO.0, PALERMO.1, 165.0);
    assert_eq!(names(&results), vec!["Palermo"]);

    let results = index.search(PALERMO.0, PALERMO.1, 180.0);
    assert_eq!(results.len(), 2);
    let found: HashSet<String> = names(&results).into_iter().collect();
    assert!(found.contains("Palermo") && found.contains("Catania"));
}

#[test]
fn test_get_out_of_range_is_not_found() {
    let index = GeoIndex::new();
    assert!(matches!(
        index.get(LocationId::new(0)),
        Err(GeoIndexError::NotFound(_))
    ));

    index.add(Location::new(1.0, 2.0)).unwrap();
    assert!(index.get(LocationId::new(0)).is_ok());
    assert!(matches!(
        index.get(LocationId::new(1)),
        Err(GeoIndexError::NotFound(_))
    ));
    assert!(matches!(
        index.get(LocationId::new(u64::MAX)),
        Err(GeoIndexError::NotFound(_))
    ));
}

#[test]
fn test_add_with_generated_fields_is_rejected() {
    let index = GeoIndex::new();
    index.add(Location::new(PALERMO.0, PALERMO.1)).unwrap();
    index.search(PALERMO.0, PALERMO.1, 1.0);
    assert_eq!(index.index_state(), IndexState::Fresh);

    let mut with_id = Location::new(CATANIA.0, CATANIA.1);
    with_id.id = Some(LocationId::new(7));
    assert!(matches!(
        index.add(with_id),
        Err(GeoIndexError::InvalidInput(_))
    ));

    let mut with_hash = Location::new(CATANIA.0, CATANIA.1);
    with_hash.geohash = Some(12345);
    assert!(matches!(
        index.add(with_hash),
        Err(GeoIndexError::InvalidInput(_))
    ));

    // Zero is still a pre-set value.
    let mut with_zero_id = Location::new(CATANIA.0, CATANIA.1);
    with_zero_id.id = Some(LocationId::new(0));
    assert!(index.add(with_zero_id).is_err());

    assert_eq!(index.len(), 1);
    assert_eq!(index.index_state(), IndexState::Fresh);
    assert_eq!(index.add(Location::new(CATANIA.0, CATANIA.1)).unwrap(), LocationId::new(1));
}

#[test]
fn test_invalid_coordinates_are_rejected() {
    let index = GeoIndex::new();
    for (lat, lon) in [(91.0, 0.0), (0.0, 181.0), (f64::NAN, 0.0), (0.0, f64::INFINITY)] {
        assert!(matches!(
            index.add(Location::new(lat, lon)),
            Err(GeoIndexError::InvalidInput(_))
        ));
    }
    assert!(index.is_empty());
}

#[test]
fn test_one_meter_radius_uses_finest_precision() {
    assert_eq!(estimate_steps(1.0), MAX_STEPS);
}

#[test]
fn test_identifiers_strictly_increase() {
    let index = GeoIndex::new();
    let mut last = None;
    for i in 0..500 {
        let lat = -60.0 + (i as f64 * 0.23) % 120.0;
        let lon = -170.0 + (i as f64 * 0.71) % 340.0;
        let id = index.add(Location::new(lat, lon)).unwrap();
        if let Some(prev) = last {
            assert!(id > prev);
        }
        assert_eq!(id.get(), i);
        last = Some(id);
    }
}

#[test]
fn test_search_includes_self_for_every_radius() {
    let index = GeoIndex::new();
    let points = [
        PALERMO,
        CATANIA,
        (51.5074, -0.1278),
        (-33.8688, 151.2093),
        (40.7128, -74.0060),
        (0.0, 0.0),
        (-0.000001, 0.000001),
        (64.1466, -21.9426),
    ];
    let ids: Vec<LocationId> = points
        .iter()
        .map(|&(lat, lon)| index.add(Location::new(lat, lon)).unwrap())
        .collect();

    for radius in [0.0, 0.0005, 0.001, 0.01, 0.5, 1.0, 7.5, 42.0, 165.0, 1_000.0, 5_000.0, 20_000.0] {
        for (id, &(lat, lon)) in ids.iter().zip(points.iter()) {
            let results = index.search(lat, lon, radius);
            assert!(
                results.iter().any(|r| r.id() == *id),
                "location {id} missing at radius {radius}"
            );
        }
    }
}

#[test]
fn test_larger_radius_returns_superset() {
    let index = GeoIndex::new();
    add_grid(&index);

    let radii = [0.0, 1.0, 5.0, 12.0, 30.0, 80.0, 165.0, 400.0, 1_500.0];
    for pair in radii.windows(2) {
        let small: HashSet<LocationId> = index
            .search(PALERMO.0, PALERMO.1, pair[0])
            .iter()
            .map(|r| r.id())
            .collect();
        let large: HashSet<LocationId> = index
            .search(PALERMO.0, PALERMO.1, pair[1])
            .iter()
            .map(|r| r.id())
            .collect();
        assert!(
            small.is_subset(&large),
            "{} km results not contained in {} km results",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_search_never_returns_duplicates() {
    let index = GeoIndex::new();
    for i in 0..1_000 {
        let lat = -80.0 + (i as f64 * 1.37) % 160.0;
        let lon = -179.0 + (i as f64 * 3.11) % 358.0;
        index.add(Location::new(lat, lon)).unwrap();
    }

    for radius in [10.0, 500.0, 3_000.0, 8_000.0, 15_000.0, 40_000.0] {
        let results = index.search(10.0, 10.0, radius);
        let unique: HashSet<LocationId> = results.iter().map(|r| r.id()).collect();
        assert_eq!(unique.len(), results.len(), "duplicates at radius {radius}");
    }
}

#[test]
fn test_results_agree_with_bounding_box() {
    let index = GeoIndex::new();
    add_grid(&index);

    let radius = 100.0;
    let records: Vec<_> = (0..index.len() as u64)
        .map(|id| index.get(LocationId::new(id)).unwrap())
        .collect();
    let in_box = |bbox: geoindex::SearchBox| -> HashSet<LocationId> {
        records
            .iter()
            .filter(|r| bbox.contains(r.latitude(), r.longitude()))
            .map(|r| r.id())
            .collect()
    };

    let found: HashSet<LocationId> = index
        .search(PALERMO.0, PALERMO.1, radius)
        .iter()
        .map(|r| r.id())
        .collect();

    // Nothing outside the box is returned.
    let outer = in_box(geoindex::SearchBox::around(PALERMO.0, PALERMO.1, radius));
    assert!(found.is_subset(&outer));

    // Everything well inside the neighbor cells is returned.
    let inner = in_box(geoindex::SearchBox::around(PALERMO.0, PALERMO.1, radius * 0.45));
    assert!(!inner.is_empty());
    assert!(inner.is_subset(&found));
}

#[test]
fn test_search_point_matches_search() {
    let index = GeoIndex::new();
    index.add(Location::from_point(&Point::new(PALERMO.1, PALERMO.0))).unwrap();

    let by_point = index.search_point(&Point::new(PALERMO.1, PALERMO.0), 1.0);
    let by_coords = index.search(PALERMO.0, PALERMO.1, 1.0);
    assert_eq!(by_point.len(), 1);
    assert_eq!(by_point[0].id(), by_coords[0].id());
}

#[test]
fn test_namespace_scoped_search() {
    let index = GeoIndex::new();
    index
        .add(Location::new(PALERMO.0, PALERMO.1).with_namespace("cities"))
        .unwrap();
    index
        .add(Location::new(PALERMO.0 + 0.01, PALERMO.1).with_namespace("airports"))
        .unwrap();
    index.add(Location::new(PALERMO.0, PALERMO.1 + 0.01)).unwrap();

    assert_eq!(index.search(PALERMO.0, PALERMO.1, 10.0).len(), 3);

    let cities = index.search_namespace("cities", PALERMO.0, PALERMO.1, 10.0);
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].namespace().unwrap().as_str(), "cities");

    assert!(index.search_namespace("ports", PALERMO.0, PALERMO.1, 10.0).is_empty());
}

#[test]
fn test_search_around_composite_key() {
    let index = GeoIndex::new();
    index.add(Location::new(PALERMO.0, PALERMO.1)).unwrap();
    let catania = index.add(Location::new(CATANIA.0, CATANIA.1)).unwrap();

    let key = index.get(catania).unwrap().key().to_string();
    let expected_hash = Wgs84Codec.encode(CATANIA.0, CATANIA.1, MAX_STEPS);
    assert_eq!(key, format!("{}-1", expected_hash));

    let results = index.search_around(&key, 200.0).unwrap();
    assert_eq!(results.len(), 2);

    assert!(matches!(
        index.search_around("garbage", 180.0),
        Err(GeoIndexError::NotFound(_))
    ));
    assert!(matches!(
        index.search_around(&format!("{}-9", expected_hash), 180.0),
        Err(GeoIndexError::NotFound(_))
    ));
}

#[test]
fn test_atomic_batch_assigns_consecutive_ids() {
    let index = GeoIndex::new();
    index.add(Location::new(0.0, 0.0)).unwrap();

    let ids = index
        .atomic(|batch| {
            for i in 0..10 {
                batch.add(Location::new(45.0 + i as f64 * 0.001, 9.0))?;
            }
            assert_eq!(batch.len(), 10);
            Ok(())
        })
        .unwrap();

    let expected: Vec<LocationId> = (1..=10).map(LocationId::new).collect();
    assert_eq!(ids, expected);
    assert_eq!(index.search(45.0, 9.0, 5.0).len(), 10);
}

#[test]
fn test_empty_index_search() {
    let index = GeoIndex::new();
    assert!(index.search(0.0, 0.0, 1_000.0).is_empty());
    assert!(index.search(0.0, 0.0, -5.0).is_empty());
    assert!(index.search(f64::NAN, 0.0, f64::NAN).is_empty());
}
