//! Feature assembly: raw record in, fixed-order numeric vector out.
//!
//! The column order comes from the [`FeatureSchema`] and is part of the
//! contract with the trained model.

use ndarray::Array2;
use std::sync::Arc;
use tracing::debug;

use crate::error::{PipelineError, ValidationError};
use crate::preprocessing::encoding::{one_hot, CategoryCodec, OrdinalCategory};
use crate::preprocessing::geo::{GeoIndex, GeoPoint};
use crate::preprocessing::imputation::Imputer;
use crate::preprocessing::region::Region;
use crate::preprocessing::schema::{FeatureColumn, FeatureSchema, GeoPolicy};
use crate::preprocessing::traits::RecordTransformer;
use crate::preprocessing::validation::InputValidator;
use crate::record::{CompleteRecord, PostalCode, PropertyRecord};

/// Numeric features of one record, in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    columns: Arc<[FeatureColumn]>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Value of a named column, `None` if the schema does not include it.
    pub fn get(&self, column: FeatureColumn) -> Option<f64> {
        self.columns
            .iter()
            .position(|&c| c == column)
            .map(|idx| self.values[idx])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Stack vectors built with the same schema into an `(n_samples, n_features)`
/// matrix.
pub fn to_matrix(vectors: &[FeatureVector]) -> Array2<f64> {
    let n_features = vectors.first().map(|v| v.len()).unwrap_or(0);
    let mut matrix = Array2::zeros((vectors.len(), n_features));
    for (mut row, vector) in matrix.rows_mut().into_iter().zip(vectors) {
        for (cell, &value) in row.iter_mut().zip(vector.values()) {
            *cell = value;
        }
    }
    matrix
}

/// Runs validation, imputation, encoding, region classification and geo lookup
/// over a record and emits its [`FeatureVector`].
#[derive(Clone, Debug)]
pub struct FeatureAssembler {
    validator: InputValidator,
    imputer: Imputer,
    geo: Arc<GeoIndex>,
    columns: Arc<[FeatureColumn]>,
    geo_policy: GeoPolicy,
}

impl FeatureAssembler {
    pub fn new(schema: &FeatureSchema, geo: Arc<GeoIndex>) -> Self {
        Self {
            validator: InputValidator::new(),
            imputer: Imputer::new(schema.defaults.clone()),
            geo,
            columns: schema.columns.clone().into(),
            geo_policy: schema.geo_policy,
        }
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    /// Full chain from a raw record.
    ///
    /// Fails fast: the first validation or location error aborts assembly and
    /// no partial vector is returned.
    pub fn assemble(&self, record: &PropertyRecord) -> Result<FeatureVector, PipelineError> {
        let validated = self.validator.transform(record)?;
        let complete = self.imputer.transform(&validated)?;
        self.transform(&complete)
    }

    /// Coordinates for a postal code under the schema's geo policy.
    pub fn resolve_location(&self, code: PostalCode) -> Result<GeoPoint, ValidationError> {
        match self.geo.lookup(code) {
            Some(point) => Ok(point),
            None => self
                .geo_policy
                .sentinel()
                .ok_or(ValidationError::UnresolvedLocation { code: code.value() }),
        }
    }

    fn encode(&self, record: &CompleteRecord) -> Result<FeatureVector, PipelineError> {
        let location = self.resolve_location(record.postal_code)?;
        let region = Region::classify(record.postal_code);
        let region_flags = one_hot(region);
        let region_flag = |slot: Region| region_flags[slot.code() as usize];

        let values = self
            .columns
            .iter()
            .map(|column| match column {
                FeatureColumn::RoomsNumber => f64::from(record.rooms_number),
                FeatureColumn::Area => record.area,
                FeatureColumn::Lift => flag(record.lift),
                FeatureColumn::Garden => flag(record.garden),
                FeatureColumn::SwimmingPool => flag(record.swimming_pool),
                FeatureColumn::Terrace => flag(record.terrace),
                FeatureColumn::Parking => flag(record.parking),
                FeatureColumn::EquippedKitchen => flag(record.equipped_kitchen),
                FeatureColumn::BuildingState => {
                    f64::from(CategoryCodec::encode(record.building_state))
                }
                FeatureColumn::EnergyLabel => f64::from(CategoryCodec::encode(record.energy_label)),
                FeatureColumn::RegionBrussels => region_flag(Region::Brussels),
                FeatureColumn::RegionWallonia => region_flag(Region::Wallonia),
                FeatureColumn::RegionFlanders => region_flag(Region::Flanders),
                FeatureColumn::PropertyType => f64::from(CategoryCodec::encode(record.property_type)),
                FeatureColumn::Latitude => location.latitude,
                FeatureColumn::Longitude => location.longitude,
            })
            .collect();

        debug!(postal_code = %record.postal_code, %region, "feature vector assembled");
        Ok(FeatureVector {
            columns: Arc::clone(&self.columns),
            values,
        })
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Encoding step on an already validated and imputed record.
impl RecordTransformer for FeatureAssembler {
    type Input = CompleteRecord;
    type Output = FeatureVector;

    fn transform(&self, input: &Self::Input) -> Result<Self::Output, PipelineError> {
        self.encode(input)
    }
}
