//! TF-IDF vectorizer for text feature extraction.
//!
//! The vectorizer is fitted once on the normalized training corpus and is
//! immutable afterwards: `fit` is the only constructor, so a transform can
//! never observe a partially built vocabulary.

use std::cmp::Ordering;
use std::collections::HashSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};

/// Configuration for vocabulary construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Maximum number of retained vocabulary terms.
    pub max_features: usize,
    /// Whether to include contiguous bigrams alongside unigrams.
    pub bigrams: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 8000,
            bigrams: true,
        }
    }
}

/// Per-term bookkeeping collected while scanning the corpus.
#[derive(Debug, Clone, Copy)]
struct TermStats {
    /// Order of first appearance in the corpus.
    first_seen: usize,
    /// Total occurrences across the corpus.
    corpus_freq: u64,
    /// Number of documents containing the term.
    doc_freq: u64,
}

/// TF-IDF vectorizer over unigrams and contiguous bigrams.
///
/// Vocabulary indices are assigned in first-seen corpus order among the
/// retained terms, so the feature layout is reproducible run to run.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each retained term.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Whether bigrams participate in the vocabulary.
    bigrams: bool,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("bigrams", &self.bigrams)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Fit a vectorizer on normalized training documents.
    ///
    /// Candidate terms are every unigram and contiguous bigram in the
    /// corpus. At most `max_features` terms are kept, ranked by corpus
    /// frequency times smoothed inverse document frequency; ties keep the
    /// earlier-seen term. The document frequency of every retained term is
    /// recorded as its IDF weight for transform time.
    pub fn fit(config: &VectorizerConfig, documents: &[String]) -> Result<Self> {
        if documents.is_empty() {
            return Err(VeracityError::invalid_argument(
                "cannot fit vectorizer on an empty corpus",
            ));
        }
        if config.max_features == 0 {
            return Err(VeracityError::invalid_argument(
                "max_features must be greater than zero",
            ));
        }

        let n_documents = documents.len();
        let mut stats: AHashMap<String, TermStats> = AHashMap::new();
        let mut next_order = 0usize;

        for doc in documents {
            let terms = Self::terms_of(doc, config.bigrams);

            for term in &terms {
                if let Some(entry) = stats.get_mut(term) {
                    entry.corpus_freq += 1;
                } else {
                    stats.insert(
                        term.clone(),
                        TermStats {
                            first_seen: next_order,
                            corpus_freq: 1,
                            doc_freq: 0,
                        },
                    );
                    next_order += 1;
                }
            }

            // Document frequency counts each document once per term
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                if let Some(entry) = stats.get_mut(term.as_str()) {
                    entry.doc_freq += 1;
                }
            }
        }

        let idf_of = |doc_freq: u64| -> f64 {
            ((1.0 + n_documents as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
        };

        // Rank by corpus frequency x IDF; the stable sort keeps first-seen
        // order for equal scores.
        let mut candidates: Vec<(String, TermStats)> = stats.into_iter().collect();
        candidates.sort_by_key(|(_, stats)| stats.first_seen);
        candidates.sort_by(|a, b| {
            let score_a = a.1.corpus_freq as f64 * idf_of(a.1.doc_freq);
            let score_b = b.1.corpus_freq as f64 * idf_of(b.1.doc_freq);
            score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal)
        });
        candidates.truncate(config.max_features);

        // Assign indices in first-seen order among the survivors
        candidates.sort_by_key(|(_, stats)| stats.first_seen);

        let mut vocabulary = AHashMap::with_capacity(candidates.len());
        let mut idf = Vec::with_capacity(candidates.len());
        for (index, (term, stats)) in candidates.into_iter().enumerate() {
            vocabulary.insert(term, index);
            idf.push(idf_of(stats.doc_freq));
        }

        Ok(Self {
            vocabulary,
            idf,
            n_documents,
            bigrams: config.bigrams,
        })
    }

    /// Extract unigram and bigram terms from a normalized document.
    fn terms_of(document: &str, bigrams: bool) -> Vec<String> {
        let tokens: Vec<&str> = document.split_whitespace().collect();
        let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        if bigrams {
            for pair in tokens.windows(2) {
                terms.push(format!("{} {}", pair[0], pair[1]));
            }
        }
        terms
    }

    /// Transform a normalized document into a TF-IDF feature vector.
    ///
    /// Out-of-vocabulary terms contribute nothing. The vector is
    /// L2-normalized unless every entry is zero.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut weights = vec![0.0; self.vocabulary.len()];

        for term in Self::terms_of(document, self.bigrams) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                weights[idx] += 1.0;
            }
        }

        for (idx, weight) in weights.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        // L2 normalization; the all-zero vector stays zero
        let norm: f64 = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in &mut weights {
                *weight /= norm;
            }
        }

        weights
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Get the number of training documents.
    pub fn document_count(&self) -> usize {
        self.n_documents
    }

    /// Look up the index of a term, if retained.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_fit_builds_unigrams_and_bigrams() {
        let documents = corpus(&["great product", "great price"]);
        let vectorizer = TfIdfVectorizer::fit(&VectorizerConfig::default(), &documents).unwrap();

        // unigrams: great, product, price; bigrams: "great product", "great price"
        assert_eq!(vectorizer.vocabulary_size(), 5);
        assert!(vectorizer.term_index("great").is_some());
        assert!(vectorizer.term_index("great product").is_some());
        assert!(vectorizer.term_index("great price").is_some());
    }

    #[test]
    fn test_transform_width_matches_vocabulary() {
        let documents = corpus(&["great product fast ship", "bad product slow ship"]);
        let vectorizer = TfIdfVectorizer::fit(&VectorizerConfig::default(), &documents).unwrap();

        let features = vectorizer.transform("great product");
        assert_eq!(features.len(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_transform_out_of_vocabulary_is_zero_vector() {
        let documents = corpus(&["great product", "bad product"]);
        let vectorizer = TfIdfVectorizer::fit(&VectorizerConfig::default(), &documents).unwrap();

        let features = vectorizer.transform("entirely unknown words");
        assert_eq!(features.len(), vectorizer.vocabulary_size());
        assert!(features.iter().all(|&w| w == 0.0));

        let empty = vectorizer.transform("");
        assert!(empty.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let documents = corpus(&["great product fast ship", "bad product slow ship"]);
        let vectorizer = TfIdfVectorizer::fit(&VectorizerConfig::default(), &documents).unwrap();

        let features = vectorizer.transform("great product fast");
        let norm: f64 = features.iter().map(|w| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let documents = corpus(&[
            "one two three four five",
            "one two six seven eight",
            "one nine ten eleven twelve",
        ]);
        let config = VectorizerConfig {
            max_features: 4,
            bigrams: false,
        };
        let vectorizer = TfIdfVectorizer::fit(&config, &documents).unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 4);
        // "one" occurs in every document; frequency keeps it ranked in
        assert!(vectorizer.term_index("one").is_some());
    }

    #[test]
    fn test_indices_follow_first_seen_order() {
        let documents = corpus(&["alpha beta", "beta gamma"]);
        let config = VectorizerConfig {
            max_features: 8000,
            bigrams: false,
        };
        let vectorizer = TfIdfVectorizer::fit(&config, &documents).unwrap();

        assert_eq!(vectorizer.term_index("alpha"), Some(0));
        assert_eq!(vectorizer.term_index("beta"), Some(1));
        assert_eq!(vectorizer.term_index("gamma"), Some(2));
    }

    #[test]
    fn test_fit_empty_corpus_is_an_error() {
        let result = TfIdfVectorizer::fit(&VectorizerConfig::default(), &[]);
        assert!(result.is_err());
    }
}
