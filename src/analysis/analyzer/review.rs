//! Review analyzer: the fixed normalization pipeline for review text.
//!
//! Normalization runs, in order: lower-casing, removal of every character
//! that is not a lowercase letter or whitespace, whitespace tokenization,
//! stop-word removal, lemmatization. The same pipeline is used for training
//! and inference, so a text always normalizes to the same token sequence.

use std::collections::HashSet;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::{LowercaseCharFilter, PatternStripCharFilter};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Pattern matching every character that must be stripped from review text.
const STRIP_PATTERN: &str = r"[^a-z\s]";

pub struct ReviewAnalyzer {
    inner: PipelineAnalyzer,
}

impl ReviewAnalyzer {
    /// Create a review analyzer with the default stop words and lemmatizer.
    pub fn new() -> Result<Self> {
        Self::with_stop_filter(StopFilter::new())
    }

    /// Create a review analyzer with a custom stop-word set.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Result<Self> {
        Self::with_stop_filter(StopFilter::with_stop_words(stop_words))
    }

    fn with_stop_filter(stop_filter: StopFilter) -> Result<Self> {
        let tokenizer = Arc::new(WhitespaceTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternStripCharFilter::new(STRIP_PATTERN)?))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(LemmaFilter::new()))
            .with_name("review".to_string());

        Ok(Self { inner: analyzer })
    }

    /// Normalize raw review text into its canonical token form, rejoined
    /// with single spaces.
    ///
    /// An empty result means the input retained no usable tokens; callers
    /// decide whether that is an error.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let tokens: Vec<String> = self.analyze(text)?.map(|token| token.text).collect();
        Ok(tokens.join(" "))
    }
}

impl Default for ReviewAnalyzer {
    fn default() -> Self {
        Self::new().expect("Review analyzer should be creatable with default settings")
    }
}

impl Analyzer for ReviewAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "review"
    }
}

impl Debug for ReviewAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_analyzer() {
        let analyzer = ReviewAnalyzer::new().unwrap();

        let normalized = analyzer.normalize("Great product, fast shipping!").unwrap();
        assert_eq!(normalized, "great product fast ship");
    }

    #[test]
    fn test_review_analyzer_drops_stop_words() {
        let analyzer = ReviewAnalyzer::new().unwrap();

        let normalized = analyzer
            .normalize("Works as expected, no complaints")
            .unwrap();
        assert_eq!(normalized, "work expect complaint");
    }

    #[test]
    fn test_review_analyzer_strips_digits_and_punctuation() {
        let analyzer = ReviewAnalyzer::new().unwrap();

        let normalized = analyzer.normalize("5 stars!!! 10/10 would buy again").unwrap();
        assert_eq!(normalized, "star buy");
    }

    #[test]
    fn test_review_analyzer_empty_output_is_not_an_error() {
        let analyzer = ReviewAnalyzer::new().unwrap();

        let normalized = analyzer.normalize("12345 !!! ???").unwrap();
        assert_eq!(normalized, "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let analyzer = ReviewAnalyzer::new().unwrap();

        for text in [
            "Great product, fast shipping!",
            "OMG this is literally the best amazing product ever must buy now",
            "Unbelievable life-changing amazing obsessed buy now wow",
        ] {
            let once = analyzer.normalize(text).unwrap();
            let twice = analyzer.normalize(&once).unwrap();
            assert_eq!(once, twice, "normalization of {text:?} is not stable");
        }
    }

    #[test]
    fn test_review_analyzer_name() {
        let analyzer = ReviewAnalyzer::new().unwrap();

        assert_eq!(analyzer.name(), "review");
    }
}
