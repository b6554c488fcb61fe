//! Soft-voting ensemble over the two base classifiers.
//!
//! The ensemble averages its members' class-probability distributions
//! element-wise and implements the same [`SoftClassifier`] trait, so
//! callers never special-case a model type.

use serde::{Deserialize, Serialize};

use crate::classifier::forest::{ForestConfig, RandomForest};
use crate::classifier::linear::{LogisticConfig, LogisticRegression};
use crate::classifier::{Label, N_CLASSES, SoftClassifier};
use crate::error::{Result, VeracityError};

/// Hyperparameters for both ensemble members.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Logistic regression hyperparameters.
    pub logistic: LogisticConfig,
    /// Random forest hyperparameters.
    pub forest: ForestConfig,
}

/// Fitted soft-voting ensemble.
pub struct SoftVotingClassifier {
    members: Vec<Box<dyn SoftClassifier>>,
}

impl std::fmt::Debug for SoftVotingClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftVotingClassifier")
            .field(
                "members",
                &self.members.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl SoftVotingClassifier {
    /// Fit both base classifiers independently on the same training data.
    pub fn fit(config: &EnsembleConfig, x: &[Vec<f64>], y: &[Label]) -> Result<Self> {
        let logistic = LogisticRegression::fit(&config.logistic, x, y)?;
        let forest = RandomForest::fit(&config.forest, x, y)?;

        Ok(Self {
            members: vec![Box::new(logistic), Box::new(forest)],
        })
    }

    /// Build an ensemble from already-fitted members.
    pub fn from_members(members: Vec<Box<dyn SoftClassifier>>) -> Self {
        Self { members }
    }

    /// Names of the ensemble members.
    pub fn member_names(&self) -> Vec<&'static str> {
        self.members.iter().map(|m| m.name()).collect()
    }

    /// Predict the label and averaged distribution for a feature vector.
    ///
    /// The label is the class with the higher averaged probability; an
    /// exact tie resolves to the first label in [`Label::ORDERED`].
    pub fn predict(&self, features: &[f64]) -> Result<(Label, [f64; N_CLASSES])> {
        let distribution = self.predict_proba(features)?;

        let mut best = Label::ORDERED[0];
        let mut best_probability = distribution[best.index()];
        for &label in &Label::ORDERED[1..] {
            if distribution[label.index()] > best_probability {
                best = label;
                best_probability = distribution[label.index()];
            }
        }

        Ok((best, distribution))
    }
}

impl SoftClassifier for SoftVotingClassifier {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; N_CLASSES]> {
        if self.members.is_empty() {
            return Err(VeracityError::not_trained("ensemble has no members"));
        }

        let mut distribution = [0.0; N_CLASSES];
        for member in &self.members {
            let member_distribution = member.predict_proba(features)?;
            for (sum, p) in distribution.iter_mut().zip(member_distribution.iter()) {
                *sum += p;
            }
        }

        let n = self.members.len() as f64;
        for p in &mut distribution {
            *p /= n;
        }

        Ok(distribution)
    }

    fn name(&self) -> &'static str {
        "soft_voting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-output classifier for combination-rule tests.
    struct ConstantClassifier {
        distribution: [f64; N_CLASSES],
    }

    impl SoftClassifier for ConstantClassifier {
        fn predict_proba(&self, _features: &[f64]) -> Result<[f64; N_CLASSES]> {
            Ok(self.distribution)
        }

        fn name(&self) -> &'static str {
            "constant"
        }
    }

    fn separable_data() -> (Vec<Vec<f64>>, Vec<Label>) {
        let x = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.8, 0.2],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
            vec![0.2, 0.8],
        ];
        let y = vec![
            Label::Real,
            Label::Real,
            Label::Real,
            Label::Fake,
            Label::Fake,
            Label::Fake,
        ];
        (x, y)
    }

    fn small_config() -> EnsembleConfig {
        EnsembleConfig {
            forest: ForestConfig {
                n_trees: 25,
                ..ForestConfig::default()
            },
            ..EnsembleConfig::default()
        }
    }

    #[test]
    fn test_ensemble_fits_both_members() {
        let (x, y) = separable_data();
        let ensemble = SoftVotingClassifier::fit(&small_config(), &x, &y).unwrap();

        assert_eq!(
            ensemble.member_names(),
            vec!["logistic_regression", "random_forest"]
        );
    }

    #[test]
    fn test_ensemble_separates_classes() {
        let (x, y) = separable_data();
        let ensemble = SoftVotingClassifier::fit(&small_config(), &x, &y).unwrap();

        let (label, _) = ensemble.predict(&[1.0, 0.0]).unwrap();
        assert_eq!(label, Label::Real);

        let (label, _) = ensemble.predict(&[0.0, 1.0]).unwrap();
        assert_eq!(label, Label::Fake);
    }

    #[test]
    fn test_averaged_probabilities_sum_to_one() {
        let (x, y) = separable_data();
        let ensemble = SoftVotingClassifier::fit(&small_config(), &x, &y).unwrap();

        let proba = ensemble.predict_proba(&[0.5, 0.5]).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
        assert!(proba.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_combination_is_arithmetic_mean() {
        let ensemble = SoftVotingClassifier::from_members(vec![
            Box::new(ConstantClassifier {
                distribution: [0.8, 0.2],
            }),
            Box::new(ConstantClassifier {
                distribution: [0.4, 0.6],
            }),
        ]);

        let proba = ensemble.predict_proba(&[]).unwrap();
        assert!((proba[0] - 0.6).abs() < 1e-12);
        assert!((proba[1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_tie_resolves_to_first_label() {
        let ensemble = SoftVotingClassifier::from_members(vec![Box::new(ConstantClassifier {
            distribution: [0.5, 0.5],
        })]);

        let (label, _) = ensemble.predict(&[]).unwrap();
        assert_eq!(label, Label::Real);
    }

    #[test]
    fn test_empty_ensemble_is_not_trained() {
        let ensemble = SoftVotingClassifier::from_members(Vec::new());

        match ensemble.predict_proba(&[]) {
            Err(VeracityError::ModelNotTrained(_)) => {}
            other => panic!("expected ModelNotTrained, got {other:?}"),
        }
    }
}
