//! Configuration for detector training and verdict fusion.

use serde::{Deserialize, Serialize};

use crate::classifier::EnsembleConfig;
use crate::features::VectorizerConfig;

/// Configuration for the train/held-out split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Fraction of the corpus held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the stratified split.
    pub seed: u64,
    /// Hyperparameters for both ensemble members.
    pub ensemble: EnsembleConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            ensemble: EnsembleConfig::default(),
        }
    }
}

/// Thresholds for the advisory verdict flags.
///
/// The original heuristics pinned these at 0.70 and 4 without a recorded
/// rationale, so they are configuration rather than constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictConfig {
    /// Confidence strictly below this attaches the low-confidence flag.
    pub low_confidence_threshold: f64,
    /// Hype count at or above this, on a "real" verdict, attaches the
    /// suspicious-hype flag.
    pub hype_flag_threshold: usize,
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 0.70,
            hype_flag_threshold: 4,
        }
    }
}

/// Complete detector configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Feature extraction settings.
    pub vectorizer: VectorizerConfig,
    /// Training settings.
    pub training: TrainConfig,
    /// Advisory flag thresholds.
    pub verdict: VerdictConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();

        assert_eq!(config.vectorizer.max_features, 8000);
        assert!(config.vectorizer.bigrams);
        assert_eq!(config.training.test_fraction, 0.2);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.ensemble.forest.n_trees, 100);
        assert_eq!(config.verdict.low_confidence_threshold, 0.70);
        assert_eq!(config.verdict.hype_flag_threshold, 4);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = DetectorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: DetectorConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            restored.verdict.low_confidence_threshold,
            config.verdict.low_confidence_threshold
        );
        assert_eq!(restored.training.seed, config.training.seed);
    }
}
