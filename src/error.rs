//! Error types for the Veracity library.
//!
//! This module provides error handling for all Veracity operations.
//! All errors are represented by the [`VeracityError`] enum.
//!
//! # Examples
//!
//! ```
//! use veracity::error::{Result, VeracityError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VeracityError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Veracity operations.
#[derive(Error, Debug)]
pub enum VeracityError {
    /// I/O errors (reading datasets, writing reports, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input text retained no tokens after normalization.
    #[error("Empty input: text has no tokens after normalization")]
    EmptyInput,

    /// Inference was attempted against an unfitted model.
    #[error("Model not trained: {0}")]
    ModelNotTrained(String),

    /// The labeled corpus is too small or is missing a class.
    #[error("Insufficient training data: need at least {min_samples} samples, got {actual}")]
    InsufficientTrainingData { min_samples: usize, actual: usize },

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Dataset-related errors (malformed rows, unreadable files, etc.)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VeracityError.
pub type Result<T> = std::result::Result<T, VeracityError>;

impl VeracityError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        VeracityError::Analysis(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        VeracityError::Dataset(msg.into())
    }

    /// Create a new model-not-trained error.
    pub fn not_trained<S: Into<String>>(msg: S) -> Self {
        VeracityError::ModelNotTrained(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VeracityError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VeracityError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        VeracityError::Other(format!("Internal error: {}", msg.into()))
    }
}
