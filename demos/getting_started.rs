use geoindex::{GeoIndex, GeohashCodec, Location, MAX_STEPS, estimate_steps};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("geoindex - Getting Started Example");
    println!("==================================");

    // Create an index; GEOINDEX_DEBUG=1 turns on search diagnostics
    let index = GeoIndex::builder().initial_capacity(16).build()?;
    println!("✓ Created in-memory index");

    // Add a few locations with payloads and namespaces
    let palermo = index.add(
        Location::new(38.115556, 13.361389)
            .with_properties("Palermo")
            .with_namespace("cities"),
    )?;
    let catania = index.add(
        Location::new(37.502669, 15.087269)
            .with_properties("Catania")
            .with_namespace("cities"),
    )?;
    index.add(
        Location::new(38.175958, 13.091019)
            .with_properties("Falcone-Borsellino")
            .with_namespace("airports"),
    )?;
    println!("✓ Added Palermo ({}), Catania ({}) and an airport", palermo, catania);

    // Look a location up by id and by composite key
    let record = index.get(catania)?;
    let key = record.key().to_string();
    println!(
        "✓ Catania: geohash {} ({}), key {}",
        record.geohash(),
        record.geohash_string(11)?,
        key
    );
    assert_eq!(index.get_by_key(&key)?.id(), catania);

    // Radius searches around Palermo
    for radius_km in [30.0, 165.0, 180.0] {
        let results = index.search(38.115556, 13.361389, radius_km);
        let names: Vec<_> = results
            .iter()
            .filter_map(|r| r.properties())
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .collect();
        println!(
            "✓ Within {:>5} km (step {:>2}): {:?}",
            radius_km,
            estimate_steps(radius_km * 1000.0),
            names
        );
    }

    // Only one namespace
    let airports = index.search_namespace("airports", 38.115556, 13.361389, 50.0);
    println!("✓ Airports within 50 km: {}", airports.len());

    // Atomic batch: all or nothing
    let failed = index.atomic(|batch| {
        batch.add(Location::new(37.0755, 15.2866).with_properties("Syracuse"))?;
        batch.add(Location::new(123.0, 15.0).with_properties("Nowhere"))?;
        Ok(())
    });
    println!("✓ Rejected batch: {}", failed.unwrap_err());

    // Inspect the cell holding Palermo at search precision
    let step = estimate_steps(165_000.0);
    let codec = index.codec();
    let cell = codec.decode(codec.encode(38.115556, 13.361389, step), step);
    println!(
        "✓ Palermo cell at step {} of {}: lat {:.3}..{:.3}, lon {:.3}..{:.3}",
        step, MAX_STEPS, cell.lat_min, cell.lat_max, cell.lon_min, cell.lon_max
    );

    let stats = index.stats();
    println!(
        "✓ {} locations, {} rebuilds, index {:?}",
        stats.record_count, stats.rebuild_count, stats.state
    );

    Ok(())
}
