//! End-to-end price estimation.
//!
//! Builds a small geo table and a linear model artifact in a temporary
//! directory, starts the pipeline from settings the way the `estimate` binary
//! does, then scores a few properties one at a time and as a batch.
//!
//! Run with: cargo run --example price_estimate

use immo_estimator::model::{LinearParams, ModelArtifact};
use immo_estimator::{respond, telemetry, PricePipeline, PropertyRecord, Settings};
use std::error::Error;

const GEO_TABLE: &str = "\
Post code;Post name;Geo Point
1000;BRUXELLES;50.8427501,4.3515499
1050;IXELLES;50.8222854,4.3815707
4000;LIEGE;50.6325574,5.5796662
9000;GENT;51.0500182,3.7303351
";

// rooms, area, lift, garden, pool, terrace, parking, building_state,
// energy_label, brussels, wallonia, flanders, property_type, lat, lon
const WEIGHTS: [f64; 15] = [
    0.05, 0.004, 0.03, 0.06, 0.12, 0.04, 0.05, -0.03, -0.02, 0.25, -0.15, 0.05, 0.08, 0.0, 0.0,
];

fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init("immo_estimator=debug,info");

    let dir = std::env::temp_dir().join("immo_estimator_example");
    std::fs::create_dir_all(&dir)?;
    let geo_table = dir.join("zipcodes.csv");
    std::fs::write(&geo_table, GEO_TABLE)?;
    let model = dir.join("model.json");
    ModelArtifact::Linear(LinearParams {
        weights: WEIGHTS.to_vec(),
        bias: 11.6,
    })
    .save(&model)?;

    let settings = Settings {
        geo_table,
        model,
        ..Settings::default()
    };
    let pipeline = PricePipeline::initialize(&settings)?;

    println!("=== Accepted labels ===");
    println!("{}", serde_json::to_string_pretty(&pipeline.options())?);

    let mut house = PropertyRecord::new(4, 180.0, 1050, "HOUSE").with_building_state("GOOD");
    house.garden = Some(true);
    house.parking = Some(true);
    let flat = PropertyRecord::new(2, 75.0, 4000, "APARTMENT").with_energy_label("B");
    let unknown = PropertyRecord::new(3, 110.0, 99, "HOUSE");

    println!("\n=== Single requests ===");
    for record in [&house, &flat, &unknown] {
        let vector = pipeline.assemble(record);
        if let Ok(vector) = &vector {
            println!("features: {:?}", vector.values());
        }
        println!("{}", serde_json::to_string(&respond(pipeline.predict(record)))?);
    }

    println!("\n=== Batch ===");
    let records = vec![house, flat, unknown];
    for result in pipeline.predict_batch(&records) {
        println!("{}", serde_json::to_string(&respond(result))?);
    }

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
