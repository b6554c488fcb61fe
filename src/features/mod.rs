//! Feature extraction for review classification.
//!
//! Turns normalized review text into fixed-width TF-IDF vectors over a
//! vocabulary of unigrams and bigrams learned from the training corpus.

pub mod vectorizer;

pub use vectorizer::{TfIdfVectorizer, VectorizerConfig};
