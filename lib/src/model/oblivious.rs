//! Oblivious (symmetric) decision tree ensemble.
//!
//! Every level of an oblivious tree applies the same split, so a tree of depth
//! `d` is a list of `d` splits plus `2^d` leaf values. Split `i` sets bit `i` of
//! the leaf index when `x[feature] > border`. This is the layout gradient
//! boosting libraries such as CatBoost export:
//!
//! ```json
//! {"oblivious_trees": {
//!     "n_features": 15,
//!     "trees": [{"splits": [{"feature": 1, "border": 95.5}], "leaf_values": [12.1, 12.6]}],
//!     "scale": 1.0,
//!     "bias": 0.0
//! }}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::model::{check_width, InferenceModel};

/// Deepest tree accepted when loading an artifact.
pub const MAX_DEPTH: usize = 16;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObliviousSplit {
    pub feature: usize,
    pub border: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObliviousTree {
    pub splits: Vec<ObliviousSplit>,
    pub leaf_values: Vec<f64>,
}

impl ObliviousTree {
    fn leaf_index(&self, features: &[f64]) -> usize {
        self.splits
            .iter()
            .enumerate()
            .filter(|(_, split)| features[split.feature] > split.border)
            .fold(0, |index, (depth, _)| index | (1 << depth))
    }
}

/// Serializable ensemble parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObliviousEnsembleParams {
    pub n_features: usize,
    pub trees: Vec<ObliviousTree>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub bias: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// A fitted oblivious tree ensemble: `scale * Σ leaf + bias`.
#[derive(Clone, Debug)]
pub struct ObliviousEnsemble {
    params: ObliviousEnsembleParams,
}

impl ObliviousEnsemble {
    /// Build an ensemble, checking every tree is well formed.
    pub fn from_params(params: ObliviousEnsembleParams) -> Result<Self, String> {
        if params.n_features == 0 {
            return Err("ensemble declares no features".to_string());
        }
        if !params.scale.is_finite() || !params.bias.is_finite() {
            return Err("ensemble scale and bias must be finite".to_string());
        }
        for (idx, tree) in params.trees.iter().enumerate() {
            let depth = tree.splits.len();
            if depth > MAX_DEPTH {
                return Err(format!("tree {} is deeper than {}", idx, MAX_DEPTH));
            }
            if tree.leaf_values.len() != 1 << depth {
                return Err(format!(
                    "tree {} has depth {} but {} leaves",
                    idx,
                    depth,
                    tree.leaf_values.len()
                ));
            }
            if let Some(split) = tree.splits.iter().find(|s| s.feature >= params.n_features) {
                return Err(format!(
                    "tree {} splits on feature {} of {}",
                    idx, split.feature, params.n_features
                ));
            }
            if tree.leaf_values.iter().any(|v| !v.is_finite()) {
                return Err(format!("tree {} has non-finite leaf values", idx));
            }
        }
        Ok(Self { params })
    }

    pub fn n_trees(&self) -> usize {
        self.params.trees.len()
    }

    pub fn extract_params(&self) -> ObliviousEnsembleParams {
        self.params.clone()
    }
}

impl InferenceModel for ObliviousEnsemble {
    fn n_features(&self) -> usize {
        self.params.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        check_width(self.params.n_features, features.len())?;
        let sum: f64 = self
            .params
            .trees
            .iter()
            .map(|tree| tree.leaf_values[tree.leaf_index(features)])
            .sum();
        Ok(self.params.scale * sum + self.params.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(feature: usize, border: f64) -> ObliviousSplit {
        ObliviousSplit { feature, border }
    }

    fn two_level_tree() -> ObliviousTree {
        ObliviousTree {
            splits: vec![split(0, 0.5), split(1, 100.0)],
            // index = bit0 (x0 > 0.5) | bit1 (x1 > 100)
            leaf_values: vec![1.0, 2.0, 3.0, 4.0],
        }
    }

    fn ensemble(trees: Vec<ObliviousTree>, scale: f64, bias: f64) -> ObliviousEnsemble {
        ObliviousEnsemble::from_params(ObliviousEnsembleParams {
            n_features: 2,
            trees,
            scale,
            bias,
        })
        .unwrap()
    }

    #[test]
    fn test_leaf_selection() {
        let model = ensemble(vec![two_level_tree()], 1.0, 0.0);
        assert_eq!(model.predict(&[0.0, 50.0]).unwrap(), 1.0);
        assert_eq!(model.predict(&[1.0, 50.0]).unwrap(), 2.0);
        assert_eq!(model.predict(&[0.0, 150.0]).unwrap(), 3.0);
        assert_eq!(model.predict(&[1.0, 150.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_border_is_exclusive() {
        let model = ensemble(vec![two_level_tree()], 1.0, 0.0);
        assert_eq!(model.predict(&[0.5, 100.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_scale_and_bias() {
        let stump = ObliviousTree {
            splits: vec![split(1, 10.0)],
            leaf_values: vec![0.5, 1.5],
        };
        let model = ensemble(vec![two_level_tree(), stump], 2.0, 10.0);
        // (4.0 + 1.5) * 2 + 10
        assert_eq!(model.predict(&[1.0, 150.0]).unwrap(), 21.0);
        assert_eq!(model.n_trees(), 2);
    }

    #[test]
    fn test_rejects_malformed_trees() {
        let bad_leaves = ObliviousEnsembleParams {
            n_features: 2,
            trees: vec![ObliviousTree {
                splits: vec![split(0, 0.0)],
                leaf_values: vec![1.0, 2.0, 3.0],
            }],
            scale: 1.0,
            bias: 0.0,
        };
        assert!(ObliviousEnsemble::from_params(bad_leaves).is_err());

        let bad_feature = ObliviousEnsembleParams {
            n_features: 2,
            trees: vec![ObliviousTree {
                splits: vec![split(5, 0.0)],
                leaf_values: vec![1.0, 2.0],
            }],
            scale: 1.0,
            bias: 0.0,
        };
        assert!(ObliviousEnsemble::from_params(bad_feature).is_err());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{"n_features": 1, "trees": [{"splits": [], "leaf_values": [12.0]}]}"#;
        let params: ObliviousEnsembleParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.bias, 0.0);
        let model = ObliviousEnsemble::from_params(params).unwrap();
        assert_eq!(model.predict(&[3.0]).unwrap(), 12.0);
    }

    #[test]
    fn test_feature_mismatch() {
        let model = ensemble(vec![two_level_tree()], 1.0, 0.0);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(InferenceError::FeatureMismatch { .. })
        ));
    }
}
