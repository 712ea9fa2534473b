//! From raw model score to a price.
//!
//! The model is trained on `log(1 + price)`; its raw score must go through
//! [`inverse_log1p`] before it means anything in euros. Skipping that step
//! yields values around 12-14 instead of hundreds of thousands.

use ndarray::ArrayView2;
use serde::Serialize;
use tracing::debug;

use crate::error::InferenceError;
use crate::model::InferenceModel;
use crate::preprocessing::assembler::FeatureVector;
use crate::preprocessing::schema::PricePrecision;

/// Raw score and the price derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Model output on the `log(1 + price)` scale.
    pub raw_score: f64,
    /// Non-negative price, rounded to the schema's precision.
    pub price: f64,
}

/// Inverse of the training target transform: `exp(score) - 1`.
pub fn inverse_log1p(score: f64) -> f64 {
    score.exp_m1()
}

/// Wraps the opaque model and turns its scores into prices.
pub struct PricePredictor {
    model: Box<dyn InferenceModel>,
    precision: PricePrecision,
}

impl PricePredictor {
    pub fn new(model: Box<dyn InferenceModel>, precision: PricePrecision) -> Self {
        Self { model, precision }
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    pub fn precision(&self) -> PricePrecision {
        self.precision
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, InferenceError> {
        let raw_score = self.model.predict(vector.values())?;
        let result = self.finish(raw_score)?;
        debug!(raw_score, price = result.price, "price predicted");
        Ok(result)
    }

    /// Predict every row of a feature matrix.
    ///
    /// The outer error is a failure of the model call as a whole; the inner
    /// results carry per-row failures such as a non-finite score.
    #[allow(clippy::type_complexity)]
    pub fn predict_matrix(
        &self,
        features: ArrayView2<'_, f64>,
    ) -> Result<Vec<Result<PredictionResult, InferenceError>>, InferenceError> {
        let scores = self.model.predict_batch(features)?;
        Ok(scores.iter().map(|&score| self.finish(score)).collect())
    }

    /// Inverse transform, clamp at zero, round.
    pub fn finish(&self, raw_score: f64) -> Result<PredictionResult, InferenceError> {
        if !raw_score.is_finite() {
            return Err(InferenceError::NonFinite(raw_score));
        }
        let price = inverse_log1p(raw_score);
        if !price.is_finite() {
            return Err(InferenceError::NonFinite(price));
        }
        let clamped = if price <= 0.0 { 0.0 } else { price };
        // rounding scales the price and can overflow on its own
        let rounded = self.precision.round(clamped);
        if !rounded.is_finite() {
            return Err(InferenceError::NonFinite(rounded));
        }
        Ok(PredictionResult {
            raw_score,
            price: rounded,
        })
    }
}

impl std::fmt::Debug for PricePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricePredictor")
            .field("n_features", &self.model.n_features())
            .field("precision", &self.precision)
            .finish()
    }
}
