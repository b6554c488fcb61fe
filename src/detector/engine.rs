//! Detector engine: batch training and per-request inference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::review::ReviewAnalyzer;
use crate::classifier::{Label, SoftVotingClassifier, accuracy, stratified_split};
use crate::dataset::LabeledReview;
use crate::detector::config::{DetectorConfig, VerdictConfig};
use crate::detector::prediction::{Flag, Prediction};
use crate::error::{Result, VeracityError};
use crate::features::TfIdfVectorizer;
use crate::lexicon::HypeLexicon;

/// Statistics retained from the training run.
///
/// `held_out_accuracy` is `None` when the corpus was too small to yield a
/// held-out partition. The report never feeds back into the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// When training completed.
    pub trained_at: DateTime<Utc>,
    /// Corpus rows that survived normalization.
    pub documents: usize,
    /// Rows in the training partition.
    pub train_documents: usize,
    /// Rows in the held-out partition.
    pub held_out_documents: usize,
    /// Retained vocabulary terms.
    pub vocabulary_size: usize,
    /// Ensemble accuracy on the held-out partition.
    pub held_out_accuracy: Option<f64>,
}

/// A fitted review detector.
///
/// `train` is the only way to obtain one, so every `Detector` holds a
/// complete vocabulary and a fitted ensemble. All fields are immutable;
/// [`analyze`](Detector::analyze) can run concurrently from any number of
/// callers.
pub struct Detector {
    analyzer: ReviewAnalyzer,
    vectorizer: TfIdfVectorizer,
    ensemble: SoftVotingClassifier,
    hype: HypeLexicon,
    verdict: VerdictConfig,
    report: TrainingReport,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("vectorizer", &self.vectorizer)
            .field("ensemble", &self.ensemble)
            .field("report", &self.report)
            .finish()
    }
}

impl Detector {
    /// Train a detector on a labeled corpus with the default analyzer and
    /// hype lexicon.
    pub fn train(config: DetectorConfig, corpus: &[LabeledReview]) -> Result<Self> {
        Self::train_with(config, ReviewAnalyzer::new()?, HypeLexicon::new(), corpus)
    }

    /// Train a detector with injected normalization and lexicon components.
    pub fn train_with(
        config: DetectorConfig,
        analyzer: ReviewAnalyzer,
        hype: HypeLexicon,
        corpus: &[LabeledReview],
    ) -> Result<Self> {
        // Normalize the corpus, dropping rows that retain no tokens
        let mut documents = Vec::with_capacity(corpus.len());
        let mut labels = Vec::with_capacity(corpus.len());
        for review in corpus {
            let normalized = analyzer.normalize(&review.text)?;
            if normalized.is_empty() {
                continue;
            }
            documents.push(normalized);
            labels.push(review.label);
        }

        if documents.len() < 2 {
            return Err(VeracityError::InsufficientTrainingData {
                min_samples: 2,
                actual: documents.len(),
            });
        }

        // The vocabulary is learned from the full corpus; only the
        // classifiers see the train/held-out partitioning.
        let vectorizer = TfIdfVectorizer::fit(&config.vectorizer, &documents)?;
        let vectors: Vec<Vec<f64>> = documents.iter().map(|d| vectorizer.transform(d)).collect();

        let (train_indices, held_out_indices) = stratified_split(
            &labels,
            config.training.test_fraction,
            config.training.seed,
        )?;

        let train_x: Vec<Vec<f64>> = train_indices.iter().map(|&i| vectors[i].clone()).collect();
        let train_y: Vec<Label> = train_indices.iter().map(|&i| labels[i]).collect();

        let ensemble = SoftVotingClassifier::fit(&config.training.ensemble, &train_x, &train_y)?;

        let held_out_accuracy = if held_out_indices.is_empty() {
            None
        } else {
            let predicted: Vec<Label> = held_out_indices
                .iter()
                .map(|&i| ensemble.predict(&vectors[i]).map(|(label, _)| label))
                .collect::<Result<_>>()?;
            let actual: Vec<Label> = held_out_indices.iter().map(|&i| labels[i]).collect();
            accuracy(&predicted, &actual)
        };

        let report = TrainingReport {
            trained_at: Utc::now(),
            documents: documents.len(),
            train_documents: train_indices.len(),
            held_out_documents: held_out_indices.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            held_out_accuracy,
        };

        Ok(Self {
            analyzer,
            vectorizer,
            ensemble,
            hype,
            verdict: config.verdict,
            report,
        })
    }

    /// Analyze one raw review text and return its verdict.
    ///
    /// Fails with [`VeracityError::EmptyInput`] when the text retains no
    /// tokens after normalization.
    pub fn analyze(&self, raw_text: &str) -> Result<Prediction> {
        let normalized = self.analyzer.normalize(raw_text)?;
        if normalized.is_empty() {
            return Err(VeracityError::EmptyInput);
        }

        let vector = self.vectorizer.transform(&normalized);
        let (label, distribution) = self.ensemble.predict(&vector)?;
        let confidence = distribution
            .iter()
            .fold(f64::NEG_INFINITY, |max, &p| max.max(p));
        let hype_score = self.hype.score(raw_text);
        let flags = advisory_flags(label, confidence, hype_score, &self.verdict);

        Ok(Prediction {
            label,
            confidence,
            hype_score,
            flags,
        })
    }

    /// Get the retained training statistics.
    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// Get the vocabulary size of the fitted vectorizer.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}

/// Compute the advisory flags for a verdict.
///
/// The rules are independent and additive: a below-threshold confidence
/// (strict less-than) attaches [`Flag::LowConfidence`]; a "real" verdict
/// with a hype count at or above the threshold attaches
/// [`Flag::SuspiciousHypeForReal`].
pub fn advisory_flags(
    label: Label,
    confidence: f64,
    hype_score: usize,
    config: &VerdictConfig,
) -> Vec<Flag> {
    let mut flags = Vec::new();

    if confidence < config.low_confidence_threshold {
        flags.push(Flag::LowConfidence);
    }
    if label == Label::Real && hype_score >= config.hype_flag_threshold {
        flags.push(Flag::SuspiciousHypeForReal);
    }

    flags
}
