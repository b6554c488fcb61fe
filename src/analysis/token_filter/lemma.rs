//! Lemmatization token filter and lemmatizer implementations.

use std::collections::HashMap;
use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its dictionary base form.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Irregular word forms that the suffix rules cannot derive.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("people", "person"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("ran", "run"),
    ("went", "go"),
    ("made", "make"),
    ("took", "take"),
    ("got", "get"),
    ("gave", "give"),
    ("came", "come"),
    ("said", "say"),
    ("sold", "sell"),
    ("told", "tell"),
    ("bought", "buy"),
    ("broke", "break"),
    ("better", "good"),
    ("worse", "bad"),
];

/// Dictionary-backed lemmatizer with a fixed suffix rule set.
///
/// Looks irregular forms up in a fixed table first, then applies plural and
/// participle suffix rules. Rules only fire when the remaining stem keeps a
/// usable length, so short words pass through untouched.
#[derive(Debug, Clone)]
pub struct DictionaryLemmatizer {
    /// Irregular form -> lemma lookup table.
    irregulars: HashMap<String, String>,
}

impl DictionaryLemmatizer {
    /// Create a new dictionary lemmatizer with the default irregular forms.
    pub fn new() -> Self {
        let irregulars = IRREGULAR_FORMS
            .iter()
            .map(|&(form, lemma)| (form.to_string(), lemma.to_string()))
            .collect();

        DictionaryLemmatizer { irregulars }
    }

    /// Create a dictionary lemmatizer with a custom irregular-form table.
    pub fn with_irregulars(irregulars: HashMap<String, String>) -> Self {
        DictionaryLemmatizer { irregulars }
    }

    /// Undouble a trailing consonant or restore a dropped "e" after a
    /// participle suffix has been removed.
    fn fix_participle_stem(stem: &str) -> String {
        let bytes = stem.as_bytes();
        let n = bytes.len();

        if n >= 2 && bytes[n - 1] == bytes[n - 2] && is_consonant(bytes[n - 1]) {
            if !matches!(bytes[n - 1], b'l' | b's' | b'z') {
                return stem[..n - 1].to_string();
            }
            return stem.to_string();
        }

        if ends_cvc(stem) && measure(stem) == 1 {
            return format!("{stem}e");
        }

        stem.to_string()
    }
}

impl Default for DictionaryLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.irregulars.get(word) {
            return lemma.clone();
        }

        let n = word.len();

        // Plural rules
        if n > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..n - 3]);
        }
        if word.ends_with("sses") {
            return word[..n - 2].to_string();
        }
        if n > 4
            && (word.ends_with("shes")
                || word.ends_with("ches")
                || word.ends_with("xes")
                || word.ends_with("zes"))
        {
            return word[..n - 2].to_string();
        }

        // Participle rules
        if n > 4 && word.ends_with("ied") {
            return format!("{}y", &word[..n - 3]);
        }
        if n > 5 && word.ends_with("ing") {
            return Self::fix_participle_stem(&word[..n - 3]);
        }
        if n > 4 && word.ends_with("eed") {
            return word[..n - 1].to_string();
        }
        if n > 4 && word.ends_with("ed") {
            return Self::fix_participle_stem(&word[..n - 2]);
        }

        // Simple plural
        if n > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..n - 1].to_string();
        }

        word.to_string()
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn is_consonant(b: u8) -> bool {
    b.is_ascii_lowercase() && !is_vowel(b)
}

/// Whether the stem ends consonant-vowel-consonant, with the final consonant
/// not "w", "x", or "y".
fn ends_cvc(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    n >= 3
        && is_consonant(bytes[n - 3])
        && is_vowel(bytes[n - 2])
        && is_consonant(bytes[n - 1])
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}

/// Count vowel-to-consonant transitions, the Porter measure.
fn measure(stem: &str) -> usize {
    let mut count = 0;
    let mut prev_vowel = false;
    for &b in stem.as_bytes() {
        let vowel = is_vowel(b);
        if prev_vowel && !vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    count
}

/// Filter that applies lemmatization to tokens.
pub struct LemmaFilter {
    /// The lemmatizer to use.
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the dictionary lemmatizer.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Arc::new(DictionaryLemmatizer::new()),
        }
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let lemma = self.lemmatizer.lemmatize(&token.text);
                    token.with_text(lemma)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
