//! # immo-estimator
//!
//! Feature engineering and inference bridge for Belgian real-estate price
//! estimation. A raw property description goes in, a price in euros comes out.
//!
//! ## Core Design Principles
//!
//! - **Typed stages**: a record moves through `PropertyRecord`,
//!   `ValidatedRecord` and `CompleteRecord`, so the encoder can never see an
//!   unvalidated or partially filled record.
//! - **Closed categories**: building state, energy label, property type and
//!   region are enums with exhaustive code tables.
//! - **Versioned schema**: column order, defaults, geo policy and price
//!   precision live in one [`FeatureSchema`] checked against the model at
//!   startup.
//! - **Load once, share everywhere**: the geo table and model are read at
//!   startup and only read afterwards; [`PricePipeline`] is `Send + Sync`.
//!
//! ## Quick Start
//!
//! ```rust
//! use immo_estimator::model::{LinearModel, LinearParams};
//! use immo_estimator::preprocessing::{FeatureSchema, GeoIndex, PricePipeline};
//! use immo_estimator::PropertyRecord;
//! use std::sync::Arc;
//!
//! let table = "Post code;Geo Point\n1000;50.8427501,4.3515499\n";
//! let geo = GeoIndex::from_reader(table.as_bytes()).unwrap();
//! let model = LinearModel::from_params(LinearParams {
//!     weights: vec![0.0; 15],
//!     bias: 12.5,
//! })
//! .unwrap();
//!
//! let pipeline =
//!     PricePipeline::new(FeatureSchema::immo_v1(), Arc::new(geo), Box::new(model)).unwrap();
//! let estimate = pipeline
//!     .predict(&PropertyRecord::new(3, 120.0, 1000, "HOUSE"))
//!     .unwrap();
//! assert!(estimate.price > 0.0);
//! ```
//!
//! ## Module Structure
//!
//! - `record` — input and intermediate record types, postal codes
//! - `preprocessing` — validation, imputation, encoding, geo lookup, assembly
//! - `model` — inference models, artifact loading, price inverse transform
//! - `config` — layered runtime settings
//! - `response` — `{prediction, status_code}` response bodies
//! - `telemetry` — tracing subscriber for binaries
//! - `error` — error taxonomy

/// Runtime settings loaded from file and environment.
pub mod config;

/// Error taxonomy for request-time and startup failures.
pub mod error;

/// Pretrained models and the price inverse transform.
pub mod model;

/// Record preprocessing: validation through feature assembly.
pub mod preprocessing;

/// Raw and staged property records.
pub mod record;

pub mod response;

/// Byte serialization of parameter structs.
pub mod serialization;

pub mod telemetry;

pub use config::Settings;
pub use error::{CategoryError, InferenceError, PipelineError, StartupError, ValidationError};
pub use model::{InferenceModel, PredictionResult};
pub use preprocessing::{FeatureSchema, FeatureVector, PricePipeline};
pub use record::{PostalCode, PropertyRecord};
pub use response::{respond, Response};
