//! Record preprocessing for the price model.
//!
//! Each stage consumes one record type and produces the next, so a stage can
//! only run on input the previous stage has accepted:
//!
//! ```text
//! PropertyRecord --validate--> ValidatedRecord --impute--> CompleteRecord --assemble--> FeatureVector
//! ```
//!
//! # Stages
//!
//! - [`InputValidator`]: postal code format and range, category membership,
//!   positive numerics.
//! - [`Imputer`]: fills optional attributes from the schema's defaults.
//! - [`FeatureAssembler`]: ordinal codes, region one-hot, geo lookup, in the
//!   column order of the [`FeatureSchema`].
//!
//! [`PricePipeline`] ties the assembler to a pretrained model.
//!
//! # Example
//!
//! ```ignore
//! use immo_estimator::preprocessing::{FeatureSchema, GeoIndex, PricePipeline};
//! use immo_estimator::model::load_model;
//! use immo_estimator::PropertyRecord;
//! use std::sync::Arc;
//!
//! let geo = GeoIndex::load("data/zipcode-belgium.csv")?;
//! let model = load_model("models/immo-v1.json")?;
//! let pipeline = PricePipeline::new(FeatureSchema::immo_v1(), Arc::new(geo), model)?;
//!
//! let record = PropertyRecord::new(3, 140.0, 1050, "HOUSE");
//! let estimate = pipeline.predict(&record)?;
//! println!("{:.2} EUR", estimate.price);
//! ```

pub mod assembler;
pub mod encoding;
pub mod geo;
pub mod imputation;
pub mod predictive_pipeline;
pub mod region;
pub mod schema;
pub mod traits;
pub mod validation;

pub use assembler::{to_matrix, FeatureAssembler, FeatureVector};
pub use encoding::{BuildingState, CategoryCodec, EnergyLabel, OrdinalCategory, PropertyType};
pub use geo::{GeoIndex, GeoPoint};
pub use imputation::Imputer;
pub use predictive_pipeline::{CategoryOptions, PricePipeline};
pub use region::Region;
pub use schema::{Defaults, FeatureColumn, FeatureSchema, GeoPolicy, PricePrecision};
pub use traits::RecordTransformer;
pub use validation::InputValidator;
