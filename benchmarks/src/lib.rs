//! Shared fixtures for the immo-estimator benchmarks.
//!
//! Everything is synthetic and deterministic: a postal code table covering
//! every code in a few ranges, a linear model over the `immo-v1` schema, and
//! records cycling through the categorical labels.

use immo_estimator::model::{LinearModel, LinearParams};
use immo_estimator::preprocessing::{GeoIndex, GeoPoint};
use immo_estimator::{FeatureSchema, PostalCode, PricePipeline, PropertyRecord};
use std::sync::Arc;

const BUILDING_STATES: [&str; 6] = [
    "NEW",
    "JUST_RENOVATED",
    "TO_BE_DONE_UP",
    "GOOD",
    "TO_RENOVATE",
    "TO_RESTORE",
];
const ENERGY_LABELS: [&str; 9] = ["A++", "A+", "A", "B", "C", "D", "E", "F", "G"];
const POSTAL_CODES: [u16; 6] = [1000, 1050, 1348, 4000, 8500, 9000];

/// Geo index with one entry per postal code in the fixture ranges.
pub fn geo_index() -> GeoIndex {
    let points = POSTAL_CODES.iter().filter_map(|&code| {
        let postal = PostalCode::parse(&code.to_string()).ok()?;
        let offset = f64::from(code) / 10_000.0;
        Some((postal, GeoPoint::new(50.0 + offset, 3.0 + offset)))
    });
    GeoIndex::from_points(points)
}

/// Linear model matching the `immo-v1` column count.
pub fn linear_model() -> LinearModel {
    let n = FeatureSchema::immo_v1().n_features();
    let weights = (0..n).map(|i| 0.001 * (i as f64 + 1.0)).collect();
    // Fixture parameters are finite and non-empty.
    LinearModel::from_params(LinearParams {
        weights,
        bias: 11.5,
    })
    .unwrap_or_else(|reason| panic!("fixture model: {reason}"))
}

pub fn pipeline() -> PricePipeline {
    PricePipeline::new(
        FeatureSchema::immo_v1(),
        Arc::new(geo_index()),
        Box::new(linear_model()),
    )
    .unwrap_or_else(|err| panic!("fixture pipeline: {err}"))
}

/// `n` valid records, varying every field.
pub fn records(n: usize) -> Vec<PropertyRecord> {
    (0..n)
        .map(|i| {
            let kind = if i % 2 == 0 { "HOUSE" } else { "APARTMENT" };
            let zip = POSTAL_CODES[i % POSTAL_CODES.len()];
            let mut record = PropertyRecord::new(1 + (i % 6) as i64, 40.0 + (i % 300) as f64, zip, kind)
                .with_building_state(BUILDING_STATES[i % BUILDING_STATES.len()])
                .with_energy_label(ENERGY_LABELS[i % ENERGY_LABELS.len()]);
            record.garden = Some(i % 3 == 0);
            record.terrace = (i % 5 != 0).then_some(i % 2 == 0);
            record
        })
        .collect()
}
