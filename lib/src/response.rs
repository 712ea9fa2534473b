//! Mapping of pipeline results to API response bodies.
//!
//! ```json
//! {"prediction": 412345.67, "status_code": 200}
//! {"detail": "zip_code: '99' is not a 4-digit postal code", "status_code": 400}
//! {"detail": "Internal server error", "status_code": 500}
//! ```

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::PipelineError;
use crate::model::PredictionResult;

pub const OK: u16 = 200;
pub const BAD_REQUEST: u16 = 400;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Prediction { prediction: f64, status_code: u16 },
    Error { detail: String, status_code: u16 },
}

impl Response {
    pub fn status_code(&self) -> u16 {
        match self {
            Response::Prediction { status_code, .. } | Response::Error { status_code, .. } => {
                *status_code
            }
        }
    }

    /// 400 with a caller-facing message.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Response::Error {
            detail: detail.into(),
            status_code: BAD_REQUEST,
        }
    }

    /// 500 with a fixed message. Details stay in the log.
    pub fn internal_error() -> Self {
        Response::Error {
            detail: INTERNAL_DETAIL.to_string(),
            status_code: INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert one prediction outcome into its response body.
///
/// Validation failures are returned to the caller verbatim; anything else is
/// logged and hidden behind a generic 500.
pub fn respond(result: Result<PredictionResult, PipelineError>) -> Response {
    match result {
        Ok(prediction) => Response::Prediction {
            prediction: prediction.price,
            status_code: OK,
        },
        Err(PipelineError::Validation(err)) => Response::bad_request(err.to_string()),
        Err(err) => {
            error!(error = %err, "prediction failed");
            Response::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CategoryError, InferenceError, ValidationError};

    #[test]
    fn test_success_body() {
        let response = respond(Ok(PredictionResult {
            raw_score: 12.5,
            price: 268336.29,
        }));
        assert_eq!(response.status_code(), 200);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"prediction": 268336.29, "status_code": 200})
        );
    }

    #[test]
    fn test_validation_failure_names_field() {
        let response = respond(Err(ValidationError::InvalidPropertyType {
            value: "CASTLE".to_string(),
        }
        .into()));
        assert_eq!(response.status_code(), 400);
        match response {
            Response::Error { detail, .. } => {
                assert!(detail.contains("property_type"));
                assert!(detail.contains("CASTLE"));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_internal_failures_are_opaque() {
        let inference = respond(Err(InferenceError::NonFinite(f64::NAN).into()));
        let category = respond(Err(CategoryError::UnknownCode {
            field: "energy_label",
            code: 42,
        }
        .into()));
        for response in [inference, category] {
            assert_eq!(response, Response::internal_error());
            let json = serde_json::to_value(&response).unwrap();
            assert_eq!(
                json,
                serde_json::json!({"detail": "Internal server error", "status_code": 500})
            );
        }
    }

    #[test]
    fn test_overflowing_price_is_internal_error() {
        use crate::model::PricePredictor;
        use crate::model::{LinearModel, LinearParams};
        use crate::preprocessing::PricePrecision;

        let model = LinearModel::from_params(LinearParams {
            weights: vec![1.0],
            bias: 0.0,
        })
        .unwrap();
        let predictor = PricePredictor::new(Box::new(model), PricePrecision::Cents);
        let result = predictor.finish(708.0).map_err(PipelineError::from);
        assert_eq!(respond(result), Response::internal_error());
    }

    #[test]
    fn test_bad_request_body() {
        let response = Response::bad_request("body: expected value at line 1 column 1");
        assert_eq!(response.status_code(), 400);
    }
}
