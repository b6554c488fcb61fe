//! Hype-word lexicon for the advisory heuristic signal.
//!
//! The hype score is intentionally cruder than the statistical model: it
//! lower-cases the raw text, splits on whitespace only (punctuation intact),
//! and counts exact lexicon matches. Duplicates count every time. Keeping
//! the signal independent of the normalization pipeline means it can flag
//! texts the model was never trained on.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

/// Default hype/urgency word list.
const DEFAULT_HYPE_WORDS: &[&str] = &[
    "amazing",
    "incredible",
    "unbelievable",
    "perfect",
    "obsessed",
    "must",
    "life-changing",
    "crazy",
    "awesome",
    "insane",
    "never",
    "best",
    "ever",
    "omg",
    "buy",
    "love",
    "wow",
];

/// Default hype words as a HashSet.
pub static DEFAULT_HYPE_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_HYPE_WORDS.iter().map(|&s| s.to_string()).collect()
});

/// A fixed lexicon of hype/urgency words with an exact-match counter.
///
/// # Examples
///
/// ```
/// use veracity::lexicon::HypeLexicon;
///
/// let lexicon = HypeLexicon::new();
/// assert_eq!(lexicon.score("wow wow amazing"), 3);
/// assert_eq!(lexicon.score("nothing special here"), 0);
/// ```
#[derive(Clone, Debug)]
pub struct HypeLexicon {
    /// The set of hype words to count
    words: Arc<HashSet<String>>,
}

impl HypeLexicon {
    /// Create a new hype lexicon with the default word list.
    pub fn new() -> Self {
        Self::with_words(DEFAULT_HYPE_WORDS_SET.clone())
    }

    /// Create a new hype lexicon with a custom word set.
    pub fn with_words(words: HashSet<String>) -> Self {
        HypeLexicon {
            words: Arc::new(words),
        }
    }

    /// Create a new hype lexicon from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words.into_iter().map(|s| s.into()).collect();
        Self::with_words(words)
    }

    /// Check if a word is in the lexicon.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of lexicon entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Count how many whitespace-separated tokens of the raw text exactly
    /// match a lexicon entry.
    ///
    /// The text is lower-cased but otherwise untouched: no punctuation
    /// stripping, no lemmatization. A token with trailing punctuation does
    /// not match.
    pub fn score(&self, raw_text: &str) -> usize {
        raw_text
            .to_lowercase()
            .split_whitespace()
            .filter(|word| self.words.contains(*word))
            .count()
    }
}

impl Default for HypeLexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hype_score_counts_duplicates() {
        let lexicon = HypeLexicon::new();
        assert_eq!(lexicon.score("wow wow amazing"), 3);
    }

    #[test]
    fn test_hype_score_is_order_insensitive() {
        let lexicon = HypeLexicon::new();
        assert_eq!(
            lexicon.score("amazing wow wow"),
            lexicon.score("wow amazing wow")
        );
    }

    #[test]
    fn test_hype_score_is_case_insensitive() {
        let lexicon = HypeLexicon::new();
        assert_eq!(lexicon.score("AMAZING Wow"), 2);
    }

    #[test]
    fn test_hype_score_requires_exact_match() {
        let lexicon = HypeLexicon::new();
        // Trailing punctuation defeats the exact match on purpose
        assert_eq!(lexicon.score("amazing!"), 0);
        assert_eq!(lexicon.score("amazingly good"), 0);
    }

    #[test]
    fn test_hype_score_hyphenated_entry() {
        let lexicon = HypeLexicon::new();
        assert_eq!(lexicon.score("truly life-changing purchase"), 1);
    }

    #[test]
    fn test_hype_score_empty_text() {
        let lexicon = HypeLexicon::new();
        assert_eq!(lexicon.score(""), 0);
        assert_eq!(lexicon.score("   "), 0);
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = HypeLexicon::from_words(vec!["unmissable", "epic"]);
        assert_eq!(lexicon.score("an epic unmissable deal"), 2);
        assert!(!lexicon.contains("amazing"));
    }
}
