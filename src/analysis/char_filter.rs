//! Char filter implementations for raw-text normalization.
//!
//! Char filters run before tokenization and rewrite the raw text itself.
//! The review pipeline uses them to lower-case the input and to strip every
//! character that is not a lowercase letter or whitespace.

use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, VeracityError};

/// Trait for filters that transform raw text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the given text, returning the rewritten text.
    fn filter(&self, text: &str) -> String;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A char filter that lower-cases the entire input.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, text: &str) -> String {
        text.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

/// A char filter that deletes every substring matching a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternStripCharFilter {
    /// The regex pattern whose matches are removed
    pattern: Arc<Regex>,
}

impl PatternStripCharFilter {
    /// Create a new pattern strip filter from a regex pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| VeracityError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(PatternStripCharFilter {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternStripCharFilter {
    fn filter(&self, text: &str) -> String {
        self.pattern.replace_all(text, "").into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_strip"
    }
}
