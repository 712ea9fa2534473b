//! Linear regression on the log-price scale.
//!
//! - [`LinearParams`] — serializable weights and bias, as stored in an artifact.
//! - [`LinearModel`] — inference-only predictor built from those parameters.
//!
//! `score = w · x + b`
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::model::{check_width, InferenceModel};

/// Serializable representation of linear model parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// A fitted linear model.
#[derive(Clone, Debug)]
pub struct LinearModel {
    weights: Array1<f64>,
    bias: f64,
}

impl LinearModel {
    /// Build a model from stored parameters.
    ///
    /// Rejects an empty weight vector and non-finite values.
    pub fn from_params(params: LinearParams) -> Result<Self, String> {
        if params.weights.is_empty() {
            return Err("linear model has no weights".to_string());
        }
        if !params.bias.is_finite() || params.weights.iter().any(|w| !w.is_finite()) {
            return Err("linear model has non-finite parameters".to_string());
        }
        Ok(Self {
            weights: Array1::from(params.weights),
            bias: params.bias,
        })
    }

    pub fn extract_params(&self) -> LinearParams {
        LinearParams {
            weights: self.weights.to_vec(),
            bias: self.bias,
        }
    }
}

impl InferenceModel for LinearModel {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        check_width(self.weights.len(), features.len())?;
        Ok(self.weights.dot(&ArrayView1::from(features)) + self.bias)
    }

    fn predict_batch(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        check_width(self.weights.len(), features.ncols())?;
        Ok(features.dot(&self.weights) + self.bias)
    }
}
