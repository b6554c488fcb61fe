//! Analyzer implementations that combine char filters, a tokenizer, and
//! token filters into a complete normalization pipeline.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are responsible for the complete text processing pipeline,
/// from raw text to normalized tokens. The trait requires `Send + Sync`
/// so fitted models holding an analyzer can be shared across threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual analyzer modules
pub mod pipeline;
pub mod review;

// Re-export analyzers for convenient access
pub use pipeline::PipelineAnalyzer;
pub use review::ReviewAnalyzer;
