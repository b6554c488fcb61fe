//! Labeled review corpus types and loading.
//!
//! The loader is deliberately thin glue around the core: it reads one JSON
//! object per line, accepts the column names the public review datasets
//! use, and normalizes label spellings so the core only ever sees "real"
//! or "fake". Rows with missing text or an unrecognized label are skipped
//! here, upholding the core's precondition.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::Label;
use crate::error::{Result, VeracityError};

/// One labeled training example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledReview {
    /// Raw review text.
    pub text: String,
    /// Ground-truth label.
    pub label: Label,
}

impl LabeledReview {
    /// Create a labeled review.
    pub fn new<S: Into<String>>(text: S, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Keys accepted for the review text column.
const TEXT_KEYS: &[&str] = &["text", "review", "text_"];

/// Normalize a dataset label spelling to a [`Label`].
///
/// The public fake-review datasets label computer-generated rows "CG" and
/// original rows "OR"; plain "real"/"fake" are accepted too.
pub fn normalize_label(raw: &str) -> Option<Label> {
    match raw.trim().to_lowercase().as_str() {
        "cg" | "fake" => Some(Label::Fake),
        "or" | "real" => Some(Label::Real),
        _ => None,
    }
}

/// Load a labeled corpus from a JSONL file, one object per line.
///
/// Blank lines are allowed. Rows missing text or a recognizable label are
/// skipped rather than surfaced as errors; a file yielding no usable rows
/// at all is a dataset error.
pub fn load_jsonl(path: &Path) -> Result<Vec<LabeledReview>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut reviews = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(&line).map_err(|e| {
            VeracityError::dataset(format!("line {}: invalid JSON: {e}", line_number + 1))
        })?;

        if let Some(review) = row_to_review(&value) {
            reviews.push(review);
        }
    }

    if reviews.is_empty() {
        return Err(VeracityError::dataset(format!(
            "no usable rows in {}",
            path.display()
        )));
    }

    Ok(reviews)
}

/// Convert one parsed JSON row into a labeled review, if usable.
fn row_to_review(value: &Value) -> Option<LabeledReview> {
    let object = value.as_object()?;

    let text = TEXT_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(|v| v.as_str()))?;
    if text.trim().is_empty() {
        return None;
    }

    let label = object
        .get("label")
        .and_then(|v| v.as_str())
        .and_then(normalize_label)?;

    Some(LabeledReview::new(text, label))
}
