//! Price pipeline: feature assembly followed by model inference.
//!
//! [`PricePipeline`] owns everything loaded at startup (schema, geo table,
//! model) and is immutable afterwards, so one instance can be shared by
//! reference across request threads. Dropping it releases those resources.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{PipelineError, StartupError};
use crate::model::{load_model, InferenceModel, PredictionResult, PricePredictor};
use crate::preprocessing::assembler::{to_matrix, FeatureAssembler, FeatureVector};
use crate::preprocessing::encoding::{BuildingState, CategoryCodec, EnergyLabel, PropertyType};
use crate::preprocessing::geo::GeoIndex;
use crate::preprocessing::schema::FeatureSchema;
use crate::record::PropertyRecord;

/// Accepted labels for each categorical input field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryOptions {
    pub building_state: Vec<&'static str>,
    pub property_type: Vec<&'static str>,
    pub energy_label: Vec<&'static str>,
}

impl CategoryOptions {
    pub fn new() -> Self {
        Self {
            building_state: CategoryCodec::labels::<BuildingState>(),
            property_type: CategoryCodec::labels::<PropertyType>(),
            energy_label: CategoryCodec::labels::<EnergyLabel>(),
        }
    }
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembler plus predictor, checked against each other at construction.
#[derive(Debug)]
pub struct PricePipeline {
    schema: FeatureSchema,
    assembler: FeatureAssembler,
    predictor: PricePredictor,
}

impl PricePipeline {
    /// Build a pipeline from already loaded parts.
    ///
    /// Fails when the model's feature count differs from the schema's column
    /// count.
    pub fn new(
        schema: FeatureSchema,
        geo: Arc<GeoIndex>,
        model: Box<dyn InferenceModel>,
    ) -> Result<Self, StartupError> {
        schema.validate()?;
        if model.n_features() != schema.n_features() {
            return Err(StartupError::SchemaMismatch {
                version: schema.version.clone(),
                columns: schema.n_features(),
                features: model.n_features(),
            });
        }
        let assembler = FeatureAssembler::new(&schema, geo);
        let predictor = PricePredictor::new(model, schema.price_precision);
        Ok(Self {
            schema,
            assembler,
            predictor,
        })
    }

    /// Load schema, geo table and model from the configured paths.
    pub fn initialize(settings: &Settings) -> Result<Self, StartupError> {
        let schema = match &settings.schema {
            Some(path) => FeatureSchema::load(path)?,
            None => FeatureSchema::immo_v1(),
        };
        let geo = GeoIndex::load(&settings.geo_table)?;
        let model = load_model(&settings.model)?;
        let pipeline = Self::new(schema, Arc::new(geo), model)?;
        info!(
            schema = %pipeline.schema.version,
            n_features = pipeline.schema.n_features(),
            "price pipeline ready"
        );
        Ok(pipeline)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Feature vector for a record, without running the model.
    pub fn assemble(&self, record: &PropertyRecord) -> Result<FeatureVector, PipelineError> {
        self.assembler.assemble(record)
    }

    /// Estimate the price of one property.
    pub fn predict(&self, record: &PropertyRecord) -> Result<PredictionResult, PipelineError> {
        let vector = self.assembler.assemble(record)?;
        Ok(self.predictor.predict(&vector)?)
    }

    /// Estimate many properties at once.
    ///
    /// Records are independent: an invalid record yields its own error and
    /// does not affect the others. Valid records are scored in a single
    /// matrix call. Results keep the input order.
    pub fn predict_batch(
        &self,
        records: &[PropertyRecord],
    ) -> Vec<Result<PredictionResult, PipelineError>> {
        let mut results: Vec<Option<Result<PredictionResult, PipelineError>>> =
            Vec::with_capacity(records.len());
        let mut rows = Vec::new();
        let mut vectors = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            match self.assembler.assemble(record) {
                Ok(vector) => {
                    rows.push(idx);
                    vectors.push(vector);
                    results.push(None);
                }
                Err(err) => results.push(Some(Err(err))),
            }
        }
        debug!(
            records = records.len(),
            valid = vectors.len(),
            "batch assembled"
        );

        if !vectors.is_empty() {
            let matrix = to_matrix(&vectors);
            match self.predictor.predict_matrix(matrix.view()) {
                Ok(scored) => {
                    for (idx, result) in rows.into_iter().zip(scored) {
                        results[idx] = Some(result.map_err(PipelineError::from));
                    }
                }
                Err(err) => {
                    for idx in rows {
                        results[idx] = Some(Err(err.clone().into()));
                    }
                }
            }
        }

        results.into_iter().flatten().collect()
    }

    /// Labels accepted for the categorical fields.
    pub fn options(&self) -> CategoryOptions {
        CategoryOptions::new()
    }
}
