//! Bagged random forest base classifier.
//!
//! Each tree grows on a bootstrap resample with √(n_features) candidate
//! features per split. Trees are trained in parallel with rayon; every
//! tree derives its own RNG from the base seed, so the fitted forest is
//! identical regardless of thread scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::tree::{DecisionTree, TreeParams};
use crate::classifier::{Label, N_CLASSES, SoftClassifier, balanced_class_weights};
use crate::error::{Result, VeracityError};

/// Hyperparameters for random forest training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Maximum depth of each tree.
    pub max_depth: usize,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// Seed for bootstrap resampling and feature subsampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 30,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

/// Fitted random forest model.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit a random forest on labeled feature vectors.
    ///
    /// Class-imbalance compensation uses "balanced" sample weights inside
    /// every tree's impurity computation and leaf distributions.
    pub fn fit(config: &ForestConfig, x: &[Vec<f64>], y: &[Label]) -> Result<Self> {
        if x.is_empty() || x.len() != y.len() {
            return Err(VeracityError::invalid_argument(
                "feature matrix and labels must be non-empty and equal length",
            ));
        }
        if config.n_trees == 0 {
            return Err(VeracityError::invalid_argument(
                "forest needs at least one tree",
            ));
        }

        let class_weights = balanced_class_weights(y)?;
        let sample_weights: Vec<f64> = y.iter().map(|&l| class_weights[l.index()]).collect();

        let n_samples = x.len();
        let n_features = x[0].len();
        let tree_params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            feature_candidates: ((n_features as f64).sqrt().round() as usize).max(1),
        };

        let trees: Result<Vec<DecisionTree>> = (0..config.n_trees)
            .into_par_iter()
            .map(|tree_index| {
                let mut rng = StdRng::seed_from_u64(
                    config
                        .seed
                        .wrapping_add((tree_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
                );

                let bootstrap: Vec<usize> = (0..n_samples)
                    .map(|_| rng.random_range(0..n_samples))
                    .collect();

                DecisionTree::fit(x, y, &sample_weights, &bootstrap, &tree_params, &mut rng)
            })
            .collect();

        Ok(Self { trees: trees? })
    }

    /// Number of trees in the fitted forest.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl SoftClassifier for RandomForest {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; N_CLASSES]> {
        if self.trees.is_empty() {
            return Err(VeracityError::not_trained("forest has no trees"));
        }

        let mut distribution = [0.0; N_CLASSES];
        for tree in &self.trees {
            let tree_distribution = tree.predict_proba(features);
            for (sum, p) in distribution.iter_mut().zip(tree_distribution.iter()) {
                *sum += p;
            }
        }

        let n = self.trees.len() as f64;
        for p in &mut distribution {
            *p /= n;
        }

        Ok(distribution)
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<Label>) {
        let x = vec![
            vec![1.0, 0.0, 0.3],
            vec![0.9, 0.1, 0.4],
            vec![0.8, 0.2, 0.2],
            vec![0.7, 0.0, 0.5],
            vec![0.0, 1.0, 0.6],
            vec![0.1, 0.9, 0.1],
            vec![0.2, 0.8, 0.7],
            vec![0.0, 0.7, 0.3],
        ];
        let y = vec![
            Label::Real,
            Label::Real,
            Label::Real,
            Label::Real,
            Label::Fake,
            Label::Fake,
            Label::Fake,
            Label::Fake,
        ];
        (x, y)
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_trees: 25,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn test_forest_separates_classes() {
        let (x, y) = separable_data();
        let forest = RandomForest::fit(&small_config(), &x, &y).unwrap();

        let real = forest.predict_proba(&[0.95, 0.05, 0.4]).unwrap();
        assert!(real[Label::Real.index()] > 0.5);

        let fake = forest.predict_proba(&[0.05, 0.95, 0.4]).unwrap();
        assert!(fake[Label::Fake.index()] > 0.5);
    }

    #[test]
    fn test_forest_probabilities_sum_to_one() {
        let (x, y) = separable_data();
        let forest = RandomForest::fit(&small_config(), &x, &y).unwrap();

        let proba = forest.predict_proba(&[0.5, 0.5, 0.5]).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
        assert!(proba.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_forest_is_deterministic_for_a_seed() {
        let (x, y) = separable_data();
        let first = RandomForest::fit(&small_config(), &x, &y).unwrap();
        let second = RandomForest::fit(&small_config(), &x, &y).unwrap();

        let input = [0.4, 0.6, 0.2];
        assert_eq!(
            first.predict_proba(&input).unwrap(),
            second.predict_proba(&input).unwrap()
        );
    }

    #[test]
    fn test_forest_tree_count() {
        let (x, y) = separable_data();
        let forest = RandomForest::fit(&small_config(), &x, &y).unwrap();
        assert_eq!(forest.n_trees(), 25);
    }

    #[test]
    fn test_forest_requires_both_classes() {
        let x = vec![vec![1.0], vec![0.5]];
        let y = vec![Label::Fake, Label::Fake];

        assert!(RandomForest::fit(&small_config(), &x, &y).is_err());
    }

    #[test]
    fn test_name() {
        let (x, y) = separable_data();
        let forest = RandomForest::fit(&small_config(), &x, &y).unwrap();
        assert_eq!(forest.name(), "random_forest");
    }
}
