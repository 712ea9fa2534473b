//! Error types for the estimation pipeline.
//!
//! Request-time failures are split by who can fix them:
//! - [`ValidationError`]: the caller sent bad input (HTTP 400).
//! - [`CategoryError`] and [`InferenceError`]: internal faults (HTTP 500).
//!
//! [`StartupError`] is only produced while loading process-wide state and is
//! always fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Field-level input error. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Postal code is not exactly four ASCII digits.
    #[error("zip_code: '{value}' is not a 4-digit postal code")]
    InvalidPostalCode { value: String },
    /// Postal code is well formed but outside the Belgian range.
    #[error("zip_code: {code} is outside the Belgian postal range 1000-9992")]
    PostalCodeOutOfRange { code: u16 },
    #[error("property_type: '{value}' is not one of APARTMENT, HOUSE")]
    InvalidPropertyType { value: String },
    #[error(
        "building_state: '{value}' is not one of NEW, GOOD, JUST_RENOVATED, \
         TO_BE_DONE_UP, TO_RENOVATE, TO_RESTORE"
    )]
    InvalidBuildingState { value: String },
    #[error("energy_label: '{value}' is not one of A++, A+, A, B, C, D, E, F, G")]
    InvalidEnergyLabel { value: String },
    /// Numeric field is zero, negative or not finite.
    #[error("{field}: must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("area: must be greater than 10 m², got {value}")]
    AreaTooSmall { value: f64 },
    /// No coordinates are known for this postal code and the schema rejects
    /// unresolved locations.
    #[error("zip_code: no known location for postal code {code}")]
    UnresolvedLocation { code: u16 },
}

impl ValidationError {
    /// Name of the input field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidPostalCode { .. }
            | ValidationError::PostalCodeOutOfRange { .. }
            | ValidationError::UnresolvedLocation { .. } => "zip_code",
            ValidationError::InvalidPropertyType { .. } => "property_type",
            ValidationError::InvalidBuildingState { .. } => "building_state",
            ValidationError::InvalidEnergyLabel { .. } => "energy_label",
            ValidationError::NotPositive { field, .. } => *field,
            ValidationError::AreaTooSmall { .. } => "area",
        }
    }
}

/// Failure of the category code tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("unknown {field} category '{label}'")]
    UnknownCategory { field: &'static str, label: String },
    #[error("unknown {field} code {code}")]
    UnknownCode { field: &'static str, code: u32 },
}

/// Failure while invoking the pretrained model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("feature mismatch: model expects {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("model returned a non-finite value: {0}")]
    NonFinite(f64),
    #[error("model failure: {0}")]
    Model(String),
}

/// Any failure of a single estimation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Code-table failure from direct [`CategoryCodec`] use. The validator
    /// reports unknown labels as [`ValidationError`] instead.
    ///
    /// [`CategoryCodec`]: crate::preprocessing::CategoryCodec
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl PipelineError {
    /// True when the caller can fix the request and resubmit.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}

/// Fatal error while loading process-wide state.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("geo table {path}: {reason}")]
    GeoTable { path: PathBuf, reason: String },
    #[error("model artifact {path}: {reason}")]
    ModelArtifact { path: PathBuf, reason: String },
    #[error("schema: {0}")]
    Schema(String),
    #[error("schema {version} has {columns} columns but the model expects {features} features")]
    SchemaMismatch {
        version: String,
        columns: usize,
        features: usize,
    },
}

impl From<figment::Error> for StartupError {
    fn from(err: figment::Error) -> Self {
        StartupError::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::InvalidPostalCode {
            value: "99".to_string(),
        };
        assert_eq!(err.field(), "zip_code");
        assert!(err.to_string().contains("zip_code"));

        let err = ValidationError::InvalidPropertyType {
            value: "CASTLE".to_string(),
        };
        assert_eq!(err.field(), "property_type");
        assert!(err.to_string().contains("property_type"));
        assert!(err.to_string().contains("CASTLE"));
    }

    #[test]
    fn test_not_positive_reports_dynamic_field() {
        let err = ValidationError::NotPositive {
            field: "rooms_number",
            value: 0.0,
        };
        assert_eq!(err.field(), "rooms_number");
        assert!(err.to_string().starts_with("rooms_number"));
    }

    #[test]
    fn test_unresolved_location_is_a_zip_code_error() {
        let err = ValidationError::UnresolvedLocation { code: 9992 };
        assert_eq!(err.field(), "zip_code");
    }

    #[test]
    fn test_pipeline_error_classification() {
        let client: PipelineError = ValidationError::AreaTooSmall { value: 5.0 }.into();
        assert!(client.is_client_error());

        let category: PipelineError = CategoryError::UnknownCode {
            field: "energy_label",
            code: 42,
        }
        .into();
        assert!(!category.is_client_error());

        let inference: PipelineError = InferenceError::NonFinite(f64::NAN).into();
        assert!(!inference.is_client_error());
    }

    #[test]
    fn test_startup_error_display() {
        let err = StartupError::SchemaMismatch {
            version: "immo-v1".to_string(),
            columns: 15,
            features: 14,
        };
        let msg = err.to_string();
        assert!(msg.contains("immo-v1"));
        assert!(msg.contains("15"));
        assert!(msg.contains("14"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PipelineError::from(InferenceError::Model("boom".to_string()));
        let _: &dyn std::error::Error = &err;
    }
}
