//! Decision tree grown with weighted Gini impurity.
//!
//! Trees are only ever built by the random forest: each call receives the
//! bootstrap sample indices and an RNG for per-split feature subsampling,
//! and returns an immutable tree.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::classifier::{Label, N_CLASSES};
use crate::error::{Result, VeracityError};

/// Growth limits and feature subsampling for a single tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// Number of candidate features examined per split.
    pub feature_candidates: usize,
}

/// A classification decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<Box<TreeNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeNode {
    /// Feature index for split (-1 for leaf).
    feature_idx: i32,
    /// Threshold value for split.
    threshold: f64,
    /// Weighted class distribution at this node.
    distribution: [f64; N_CLASSES],
    /// Left child (feature value <= threshold).
    left: Option<Box<TreeNode>>,
    /// Right child.
    right: Option<Box<TreeNode>>,
}

impl DecisionTree {
    /// Grow a tree on the given sample indices.
    ///
    /// `sample_weights` carries the class-imbalance compensation; bootstrap
    /// duplication arrives through repeated entries in `indices`.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[Label],
        sample_weights: &[f64],
        indices: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Result<Self> {
        if x.len() != y.len() || x.len() != sample_weights.len() {
            return Err(VeracityError::invalid_argument(
                "features, labels, and weights must have equal length",
            ));
        }
        if indices.is_empty() {
            return Err(VeracityError::invalid_argument(
                "cannot grow a tree on an empty sample",
            ));
        }

        let root = Self::build_tree(x, y, sample_weights, indices, 0, params, rng);
        Ok(Self { root })
    }

    /// Predict the class-probability distribution for a feature vector.
    pub fn predict_proba(&self, features: &[f64]) -> [f64; N_CLASSES] {
        match &self.root {
            Some(root) => Self::predict_node(root, features),
            None => [0.5, 0.5],
        }
    }

    /// Recursively build the tree.
    ///
    /// Splitting stops when the depth cap is reached, the node is too small
    /// or pure, or no candidate split improves the weighted Gini impurity.
    fn build_tree(
        x: &[Vec<f64>],
        y: &[Label],
        sample_weights: &[f64],
        indices: &[usize],
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Option<Box<TreeNode>> {
        let distribution = Self::node_distribution(y, sample_weights, indices);
        let is_pure = distribution.iter().any(|&p| p >= 1.0);

        if depth >= params.max_depth || indices.len() < params.min_samples_split || is_pure {
            return Some(Box::new(TreeNode {
                feature_idx: -1,
                threshold: 0.0,
                distribution,
                left: None,
                right: None,
            }));
        }

        if let Some((feature_idx, threshold, left_indices, right_indices)) =
            Self::find_best_split(x, y, sample_weights, indices, params, rng)
        {
            let left_child = Self::build_tree(
                x,
                y,
                sample_weights,
                &left_indices,
                depth + 1,
                params,
                rng,
            );
            let right_child = Self::build_tree(
                x,
                y,
                sample_weights,
                &right_indices,
                depth + 1,
                params,
                rng,
            );

            Some(Box::new(TreeNode {
                feature_idx: feature_idx as i32,
                threshold,
                distribution,
                left: left_child,
                right: right_child,
            }))
        } else {
            // No impurity-reducing split found, settle for a leaf
            Some(Box::new(TreeNode {
                feature_idx: -1,
                threshold: 0.0,
                distribution,
                left: None,
                right: None,
            }))
        }
    }

    /// Normalized weighted class distribution over the given indices.
    fn node_distribution(
        y: &[Label],
        sample_weights: &[f64],
        indices: &[usize],
    ) -> [f64; N_CLASSES] {
        let counts = Self::weighted_counts(y, sample_weights, indices);
        let total: f64 = counts.iter().sum();
        if total <= 0.0 {
            return [0.5, 0.5];
        }
        [counts[0] / total, counts[1] / total]
    }

    fn weighted_counts(y: &[Label], sample_weights: &[f64], indices: &[usize]) -> [f64; N_CLASSES] {
        let mut counts = [0.0; N_CLASSES];
        for &i in indices {
            counts[y[i].index()] += sample_weights[i];
        }
        counts
    }

    fn gini(counts: &[f64; N_CLASSES]) -> f64 {
        let total: f64 = counts.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        1.0 - counts
            .iter()
            .map(|&c| {
                let p = c / total;
                p * p
            })
            .sum::<f64>()
    }

    /// Find the best split over a random subsample of features.
    ///
    /// For each candidate feature the samples are sorted by value and every
    /// midpoint between distinct adjacent values is tried; the split with
    /// the largest weighted impurity decrease wins.
    fn find_best_split(
        x: &[Vec<f64>],
        y: &[Label],
        sample_weights: &[f64],
        indices: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let n_features = x[indices[0]].len();
        if n_features == 0 {
            return None;
        }

        let parent_counts = Self::weighted_counts(y, sample_weights, indices);
        let parent_weight: f64 = parent_counts.iter().sum();
        let parent_gini = Self::gini(&parent_counts);

        let amount = params.feature_candidates.clamp(1, n_features);
        let candidates = rand::seq::index::sample(rng, n_features, amount);

        let mut best_gain = 0.0;
        let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

        for feature_idx in candidates.iter() {
            let mut values: Vec<(f64, usize)> =
                indices.iter().map(|&i| (x[i][feature_idx], i)).collect();
            values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            // Sweep left-to-right, maintaining running class counts
            let mut left_counts = [0.0; N_CLASSES];
            for i in 1..values.len() {
                let (prev_value, prev_idx) = values[i - 1];
                left_counts[y[prev_idx].index()] += sample_weights[prev_idx];

                let (value, _) = values[i];
                if value <= prev_value {
                    continue;
                }

                let right_counts = [
                    parent_counts[0] - left_counts[0],
                    parent_counts[1] - left_counts[1],
                ];
                let left_weight: f64 = left_counts.iter().sum();
                let right_weight: f64 = right_counts.iter().sum();

                let children_gini = (left_weight * Self::gini(&left_counts)
                    + right_weight * Self::gini(&right_counts))
                    / parent_weight;
                let gain = parent_gini - children_gini;

                if gain > best_gain {
                    let threshold = (prev_value + value) / 2.0;
                    let left_indices: Vec<usize> =
                        values[..i].iter().map(|&(_, idx)| idx).collect();
                    let right_indices: Vec<usize> =
                        values[i..].iter().map(|&(_, idx)| idx).collect();

                    best_gain = gain;
                    best_split = Some((feature_idx, threshold, left_indices, right_indices));
                }
            }
        }

        best_split
    }

    /// Traverse to a leaf for the given features.
    fn predict_node(node: &TreeNode, features: &[f64]) -> [f64; N_CLASSES] {
        if node.feature_idx < 0 {
            return node.distribution;
        }

        let feature_value = features
            .get(node.feature_idx as usize)
            .copied()
            .unwrap_or(0.0);

        if feature_value <= node.threshold {
            match &node.left {
                Some(left) => Self::predict_node(left, features),
                None => node.distribution,
            }
        } else {
            match &node.right {
                Some(right) => Self::predict_node(right, features),
                None => node.distribution,
            }
        }
    }
}
