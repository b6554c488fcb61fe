//! Integration tests for the normalization pipeline and feature extraction.

use veracity::analysis::analyzer::review::ReviewAnalyzer;
use veracity::features::{TfIdfVectorizer, VectorizerConfig};
use veracity::lexicon::HypeLexicon;

#[test]
fn test_normalization_is_idempotent() {
    let analyzer = ReviewAnalyzer::new().unwrap();

    for text in [
        "Great product, fast shipping!",
        "Terrible quality. Broke after 2 days :(",
        "OMG this is literally the best amazing product ever must buy now",
    ] {
        let once = analyzer.normalize(text).unwrap();
        let twice = analyzer.normalize(&once).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_normalization_drops_everything_but_letters() {
    let analyzer = ReviewAnalyzer::new().unwrap();

    let normalized = analyzer.normalize("Amazing!!! 100% worth $20 \u{1F525}").unwrap();
    assert_eq!(normalized, "amaz worth");
}

#[test]
fn test_unusable_input_normalizes_to_empty_string() {
    let analyzer = ReviewAnalyzer::new().unwrap();

    assert_eq!(analyzer.normalize("12345 !!!").unwrap(), "");
    assert_eq!(analyzer.normalize("the is a of").unwrap(), "");
}

#[test]
fn test_hype_score_counts_duplicates_in_any_order() {
    let lexicon = HypeLexicon::new();

    assert_eq!(lexicon.score("wow wow amazing"), 3);
    assert_eq!(lexicon.score("amazing wow wow"), 3);
}

#[test]
fn test_hype_score_uses_raw_tokens() {
    let lexicon = HypeLexicon::new();

    // Punctuation is not stripped for the hype signal
    assert_eq!(lexicon.score("amazing! wow."), 0);
    assert_eq!(lexicon.score("amazing wow"), 2);
}

#[test]
fn test_transform_width_is_stable() {
    let documents = vec![
        "great product fast ship".to_string(),
        "omg best amaz product ever must buy".to_string(),
    ];
    let vectorizer = TfIdfVectorizer::fit(&VectorizerConfig::default(), &documents).unwrap();
    let width = vectorizer.vocabulary_size();

    assert_eq!(vectorizer.transform("great product").len(), width);
    assert_eq!(vectorizer.transform("").len(), width);
    assert_eq!(vectorizer.transform("completely unseen words").len(), width);
}

#[test]
fn test_out_of_vocabulary_terms_contribute_nothing() {
    let documents = vec!["great product".to_string(), "bad product".to_string()];
    let vectorizer = TfIdfVectorizer::fit(&VectorizerConfig::default(), &documents).unwrap();

    let with_oov = vectorizer.transform("great product zzz unheard");
    let without = vectorizer.transform("great product");

    assert_eq!(with_oov, without);
}
