//! Logistic regression base classifier.
//!
//! Full-batch gradient descent on class-weighted log-loss with a small L2
//! term. The feature vectors are L2-normalized TF-IDF weights, so a fixed
//! learning rate converges quickly without per-feature scaling.

use serde::{Deserialize, Serialize};

use crate::classifier::{Label, N_CLASSES, SoftClassifier, balanced_class_weights};
use crate::error::{Result, VeracityError};

/// Hyperparameters for logistic regression training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticConfig {
    /// Maximum number of gradient descent iterations.
    pub max_iterations: usize,
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// L2 regularization strength.
    pub l2: f64,
    /// Convergence tolerance on the loss decrease.
    pub tolerance: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            learning_rate: 0.5,
            l2: 1e-3,
            tolerance: 1e-7,
        }
    }
}

/// Fitted logistic regression model.
///
/// `fit` is the only constructor; weights never change afterwards.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// One weight per feature.
    weights: Vec<f64>,
    /// Bias term.
    bias: f64,
    /// Iterations actually run before convergence or the cap.
    iterations_run: usize,
}

impl LogisticRegression {
    /// Fit a logistic regression on labeled feature vectors.
    ///
    /// Class-imbalance compensation uses "balanced" weights, so the
    /// minority label's samples weigh more in the gradient.
    pub fn fit(config: &LogisticConfig, x: &[Vec<f64>], y: &[Label]) -> Result<Self> {
        if x.is_empty() || x.len() != y.len() {
            return Err(VeracityError::invalid_argument(
                "feature matrix and labels must be non-empty and equal length",
            ));
        }

        let n_features = x[0].len();
        if x.iter().any(|row| row.len() != n_features) {
            return Err(VeracityError::invalid_argument(
                "feature vectors must all have the same width",
            ));
        }

        let class_weights = balanced_class_weights(y)?;
        let sample_weights: Vec<f64> = y.iter().map(|&l| class_weights[l.index()]).collect();
        let total_weight: f64 = sample_weights.iter().sum();

        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut prev_loss = f64::INFINITY;
        let mut iterations_run = 0;

        for iteration in 0..config.max_iterations {
            iterations_run = iteration + 1;

            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;
            let mut loss = 0.0;

            for ((row, &label), &sample_weight) in x.iter().zip(y.iter()).zip(&sample_weights) {
                let target = label.index() as f64;
                let p = sigmoid(dot(&weights, row) + bias);
                let err = (p - target) * sample_weight;

                for (g, &feature) in grad_w.iter_mut().zip(row.iter()) {
                    *g += err * feature;
                }
                grad_b += err;

                // Clamped log-loss keeps the sum finite for saturated outputs
                let p = p.clamp(1e-12, 1.0 - 1e-12);
                loss -= sample_weight * (target * p.ln() + (1.0 - target) * (1.0 - p).ln());
            }

            loss /= total_weight;
            loss += 0.5 * config.l2 * weights.iter().map(|w| w * w).sum::<f64>();

            for (w, g) in weights.iter_mut().zip(grad_w.iter()) {
                *w -= config.learning_rate * (g / total_weight + config.l2 * *w);
            }
            bias -= config.learning_rate * (grad_b / total_weight);

            if (prev_loss - loss).abs() < config.tolerance {
                break;
            }
            prev_loss = loss;
        }

        Ok(Self {
            weights,
            bias,
            iterations_run,
        })
    }

    /// Number of gradient descent iterations actually run.
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// Number of features the model was trained on.
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}

impl SoftClassifier for LogisticRegression {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; N_CLASSES]> {
        if features.len() != self.weights.len() {
            return Err(VeracityError::invalid_argument(format!(
                "expected {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }

        let p_fake = sigmoid(dot(&self.weights, features) + self.bias);
        Ok([1.0 - p_fake, p_fake])
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
