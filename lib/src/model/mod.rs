//! Pretrained regression models.
//!
//! The pipeline treats the model as an opaque, thread-safe function from a
//! feature vector to a raw (log-scale) score: [`InferenceModel`]. Training is
//! not part of this crate; models are loaded from an artifact produced
//! elsewhere.
//!
//! ## Artifact formats
//!
//! A [`ModelArtifact`] is read by file extension:
//! - `.json` through `serde_json`
//! - anything else as `bincode` bytes ([`SerializableParams`])
//!
//! ```json
//! {"linear": {"weights": [0.1, 0.002], "bias": 11.5}}
//! ```

pub mod linear;
pub mod oblivious;
pub mod predictor;

pub use linear::{LinearModel, LinearParams};
pub use oblivious::{ObliviousEnsemble, ObliviousEnsembleParams, ObliviousSplit, ObliviousTree};
pub use predictor::{inverse_log1p, PricePredictor, PredictionResult};

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{InferenceError, StartupError};
use crate::serialization::SerializableParams;

/// A fitted model ready for inference.
///
/// Implementations hold no per-call mutable state, so one instance can be
/// shared across threads without locking.
pub trait InferenceModel: Send + Sync {
    /// Number of features the model was trained on.
    fn n_features(&self) -> usize;

    /// Raw score for a single feature vector.
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;

    /// Raw scores for an `(n_samples, n_features)` matrix.
    fn predict_batch(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        check_width(self.n_features(), features.ncols())?;
        features
            .rows()
            .into_iter()
            .map(|row| match row.as_slice() {
                Some(slice) => self.predict(slice),
                None => self.predict(&row.to_vec()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Array1::from)
    }
}

pub(crate) fn check_width(expected: usize, got: usize) -> Result<(), InferenceError> {
    if expected != got {
        return Err(InferenceError::FeatureMismatch { expected, got });
    }
    Ok(())
}

/// Serialized model, as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearParams),
    ObliviousTrees(ObliviousEnsembleParams),
}

impl ModelArtifact {
    /// Read an artifact, choosing the format from the file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let fail = |reason: String| StartupError::ModelArtifact {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| fail(e.to_string()))?;
        if is_json(path) {
            serde_json::from_slice(&bytes).map_err(|e| fail(e.to_string()))
        } else {
            Self::from_bytes(&bytes).map_err(|e| fail(e.to_string()))
        }
    }

    /// Write an artifact, choosing the format from the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let path = path.as_ref();
        let bytes = if is_json(path) {
            serde_json::to_vec_pretty(self)?
        } else {
            self.to_bytes().map_err(std::io::Error::other)?
        };
        std::fs::write(path, bytes)
    }

    /// Short name of the model family.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::ObliviousTrees(_) => "oblivious_trees",
        }
    }

    /// Build the inference model, checking the parameters are usable.
    pub fn into_model(self) -> Result<Box<dyn InferenceModel>, String> {
        Ok(match self {
            ModelArtifact::Linear(params) => Box::new(LinearModel::from_params(params)?),
            ModelArtifact::ObliviousTrees(params) => {
                Box::new(ObliviousEnsemble::from_params(params)?)
            }
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a model artifact from disk. Any failure is fatal to startup.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Box<dyn InferenceModel>, StartupError> {
    let path = path.as_ref();
    let artifact = ModelArtifact::load(path)?;
    let kind = artifact.kind();
    let model = artifact
        .into_model()
        .map_err(|reason| StartupError::ModelArtifact {
            path: path.to_path_buf(),
            reason,
        })?;
    info!(path = %path.display(), kind, n_features = model.n_features(), "model loaded");
    Ok(model)
}
