//! Classification models for review verdicts.
//!
//! Two base models (a logistic regression and a random forest) implement
//! the [`SoftClassifier`] trait and are combined by the soft-voting
//! ensemble. Fitting is a per-type constructor returning an immutable
//! model, so a trained classifier can never be observed half-built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};

pub mod ensemble;
pub mod forest;
pub mod linear;
pub mod metrics;
pub mod split;
pub mod tree;

pub use ensemble::{EnsembleConfig, SoftVotingClassifier};
pub use forest::{ForestConfig, RandomForest};
pub use linear::{LogisticConfig, LogisticRegression};
pub use metrics::accuracy;
pub use split::stratified_split;
pub use tree::DecisionTree;

/// Number of verdict classes.
pub const N_CLASSES: usize = 2;

/// Review verdict label.
///
/// The variant order is the fixed label ordering: probability
/// distributions are indexed `[real, fake]` and ties resolve to the
/// earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// A genuine review.
    Real,
    /// A fabricated review.
    Fake,
}

impl Label {
    /// All labels in the fixed ordering.
    pub const ORDERED: [Label; N_CLASSES] = [Label::Real, Label::Fake];

    /// Index of this label in probability distributions.
    pub fn index(self) -> usize {
        match self {
            Label::Real => 0,
            Label::Fake => 1,
        }
    }

    /// Label for a distribution index.
    pub fn from_index(index: usize) -> Option<Label> {
        match index {
            0 => Some(Label::Real),
            1 => Some(Label::Fake),
            _ => None,
        }
    }

    /// String form of this label.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Real => "real",
            Label::Fake => "fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Label {
    type Err = VeracityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "real" => Ok(Label::Real),
            "fake" => Ok(Label::Fake),
            _ => Err(VeracityError::invalid_argument(format!(
                "Unknown label: {s}"
            ))),
        }
    }
}

/// Trait for classifiers that output a class-probability distribution.
///
/// Implementations are immutable fitted models; prediction never mutates
/// state, so a `SoftClassifier` can be shared across threads freely.
pub trait SoftClassifier: Send + Sync {
    /// Predict the class-probability distribution for a feature vector,
    /// indexed by [`Label::index`].
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; N_CLASSES]>;

    /// Get the name of this classifier for debugging and reporting.
    fn name(&self) -> &'static str;
}

/// "Balanced" per-class weights: `n / (n_classes * n_c)`.
///
/// Misclassifying the minority label costs proportionally more, which
/// compensates for label imbalance in the corpus.
pub(crate) fn balanced_class_weights(y: &[Label]) -> Result<[f64; N_CLASSES]> {
    let mut counts = [0usize; N_CLASSES];
    for &label in y {
        counts[label.index()] += 1;
    }

    if counts.iter().any(|&c| c == 0) {
        return Err(VeracityError::InsufficientTrainingData {
            min_samples: N_CLASSES,
            actual: y.len(),
        });
    }

    let n = y.len() as f64;
    Ok([
        n / (N_CLASSES as f64 * counts[0] as f64),
        n / (N_CLASSES as f64 * counts[1] as f64),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_ordering_and_indices() {
        assert_eq!(Label::ORDERED, [Label::Real, Label::Fake]);
        assert_eq!(Label::Real.index(), 0);
        assert_eq!(Label::Fake.index(), 1);
        assert_eq!(Label::from_index(0), Some(Label::Real));
        assert_eq!(Label::from_index(1), Some(Label::Fake));
        assert_eq!(Label::from_index(2), None);
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("real".parse::<Label>().unwrap(), Label::Real);
        assert_eq!("fake".parse::<Label>().unwrap(), Label::Fake);
        assert!("genuine".parse::<Label>().is_err());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Real.to_string(), "real");
        assert_eq!(Label::Fake.to_string(), "fake");
    }

    #[test]
    fn test_balanced_class_weights() {
        let y = vec![Label::Real, Label::Real, Label::Real, Label::Fake];
        let weights = balanced_class_weights(&y).unwrap();

        // 4 / (2 * 3) and 4 / (2 * 1)
        assert!((weights[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((weights[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_class_weights_missing_class() {
        let y = vec![Label::Real, Label::Real];
        assert!(balanced_class_weights(&y).is_err());
    }
}
