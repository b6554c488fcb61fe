//! Evaluation metrics for fitted classifiers.

use crate::classifier::Label;

/// Fraction of predictions matching the true labels.
///
/// Returns `None` for empty inputs, which keeps "no held-out partition"
/// distinguishable from zero accuracy.
pub fn accuracy(predicted: &[Label], actual: &[Label]) -> Option<f64> {
    if predicted.is_empty() || predicted.len() != actual.len() {
        return None;
    }

    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();

    Some(correct as f64 / predicted.len() as f64)
}
