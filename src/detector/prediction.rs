//! Per-request prediction result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::Label;

/// Advisory flags attached to a prediction.
///
/// Flags are additive and independent; any subset may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Model confidence fell below the configured threshold.
    LowConfidence,
    /// A "real" verdict carries a high hype-word count.
    SuspiciousHypeForReal,
}

impl Flag {
    /// String form of this flag.
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::LowConfidence => "low_confidence",
            Flag::SuspiciousHypeForReal => "suspicious_hype_for_real",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The verdict for one analyzed review.
///
/// Created per inference call, never persisted or mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label.
    pub label: Label,
    /// Maximum entry of the averaged probability distribution.
    pub confidence: f64,
    /// Count of hype lexicon matches in the raw text.
    pub hype_score: usize,
    /// Advisory flags, each present at most once.
    pub flags: Vec<Flag>,
}

impl Prediction {
    /// Check whether a flag is attached.
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}
