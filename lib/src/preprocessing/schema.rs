//! Feature schema: the versioned description of what the model was trained on.
//!
//! A schema fixes the column order of the feature vector, the imputation
//! defaults, the policy for postal codes without coordinates and the price
//! precision. It is versioned together with the model artifact; changing any
//! of it without retraining silently corrupts predictions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::StartupError;
use crate::preprocessing::encoding::{BuildingState, EnergyLabel};
use crate::preprocessing::geo::GeoPoint;

/// One column of the feature vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    RoomsNumber,
    Area,
    Lift,
    Garden,
    SwimmingPool,
    Terrace,
    Parking,
    EquippedKitchen,
    BuildingState,
    EnergyLabel,
    RegionBrussels,
    RegionWallonia,
    RegionFlanders,
    PropertyType,
    Latitude,
    Longitude,
}

impl FeatureColumn {
    /// Column name as used in the training data.
    pub fn name(self) -> &'static str {
        match self {
            FeatureColumn::RoomsNumber => "rooms_number",
            FeatureColumn::Area => "area",
            FeatureColumn::Lift => "lift",
            FeatureColumn::Garden => "garden",
            FeatureColumn::SwimmingPool => "swimming_pool",
            FeatureColumn::Terrace => "terrace",
            FeatureColumn::Parking => "parking",
            FeatureColumn::EquippedKitchen => "equipped_kitchen",
            FeatureColumn::BuildingState => "building_state",
            FeatureColumn::EnergyLabel => "energy_label",
            FeatureColumn::RegionBrussels => "region_Brussels",
            FeatureColumn::RegionWallonia => "region_Wallonia",
            FeatureColumn::RegionFlanders => "region_Flanders",
            FeatureColumn::PropertyType => "property_type",
            FeatureColumn::Latitude => "latitude",
            FeatureColumn::Longitude => "longitude",
        }
    }
}

/// Imputation defaults for optional attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub lift: bool,
    pub garden: bool,
    pub swimming_pool: bool,
    pub terrace: bool,
    pub parking: bool,
    pub equipped_kitchen: bool,
    pub building_state: BuildingState,
    pub energy_label: EnergyLabel,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            lift: false,
            garden: false,
            swimming_pool: false,
            terrace: false,
            parking: false,
            equipped_kitchen: false,
            building_state: BuildingState::Good,
            energy_label: EnergyLabel::E,
        }
    }
}

/// What to do with a valid postal code that has no coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoPolicy {
    /// Fail the request with `ValidationError::UnresolvedLocation`.
    #[default]
    Reject,
    /// Use the given coordinate and continue.
    Sentinel { latitude: f64, longitude: f64 },
}

impl GeoPolicy {
    /// Sentinel coordinate, if the policy substitutes one.
    pub fn sentinel(&self) -> Option<GeoPoint> {
        match *self {
            GeoPolicy::Reject => None,
            GeoPolicy::Sentinel {
                latitude,
                longitude,
            } => Some(GeoPoint::new(latitude, longitude)),
        }
    }
}

/// Rounding applied to the final price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePrecision {
    /// Two decimals.
    #[default]
    Cents,
    /// Whole currency units.
    Whole,
}

impl PricePrecision {
    pub fn round(self, price: f64) -> f64 {
        match self {
            PricePrecision::Cents => (price * 100.0).round() / 100.0,
            PricePrecision::Whole => price.round(),
        }
    }
}

/// Versioned feature schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: String,
    pub columns: Vec<FeatureColumn>,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub geo_policy: GeoPolicy,
    #[serde(default)]
    pub price_precision: PricePrecision,
}

impl FeatureSchema {
    /// The schema the bundled model was trained with.
    pub fn immo_v1() -> Self {
        Self {
            version: "immo-v1".to_string(),
            columns: vec![
                FeatureColumn::RoomsNumber,
                FeatureColumn::Area,
                FeatureColumn::Lift,
                FeatureColumn::Garden,
                FeatureColumn::SwimmingPool,
                FeatureColumn::Terrace,
                FeatureColumn::Parking,
                FeatureColumn::BuildingState,
                FeatureColumn::EnergyLabel,
                FeatureColumn::RegionBrussels,
                FeatureColumn::RegionWallonia,
                FeatureColumn::RegionFlanders,
                FeatureColumn::PropertyType,
                FeatureColumn::Latitude,
                FeatureColumn::Longitude,
            ],
            defaults: Defaults::default(),
            geo_policy: GeoPolicy::Reject,
            price_precision: PricePrecision::Cents,
        }
    }

    /// Load a schema descriptor from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| StartupError::Schema(format!("{}: {}", path.display(), e)))?;
        let schema: FeatureSchema = serde_json::from_slice(&bytes)
            .map_err(|e| StartupError::Schema(format!("{}: {}", path.display(), e)))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Reject schemas that cannot describe a feature vector.
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.columns.is_empty() {
            return Err(StartupError::Schema(format!(
                "{} declares no columns",
                self.version
            )));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column) {
                return Err(StartupError::Schema(format!(
                    "{} lists column '{}' twice",
                    self.version,
                    column.name()
                )));
            }
        }
        if let Some(point) = self.geo_policy.sentinel() {
            if !point.latitude.is_finite() || !point.longitude.is_finite() {
                return Err(StartupError::Schema(format!(
                    "{} has a non-finite sentinel coordinate",
                    self.version
                )));
            }
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    /// Column names in vector order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::immo_v1()
    }
}
