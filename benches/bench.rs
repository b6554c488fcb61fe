//! Criterion benchmarks for the Veracity detector.
//!
//! Covers the two hot paths: text normalization and single-review
//! analysis against a fitted model.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use veracity::analysis::analyzer::review::ReviewAnalyzer;
use veracity::classifier::Label;
use veracity::dataset::LabeledReview;
use veracity::detector::{Detector, DetectorConfig};

/// Generate labeled review texts for benchmarking.
fn generate_corpus(count: usize) -> Vec<LabeledReview> {
    let real_phrases = [
        "arrived on time and works as described",
        "solid build quality for the price",
        "does the job, packaging was fine",
        "fits well and feels durable after a month",
    ];
    let fake_phrases = [
        "omg amazing best product ever must buy now",
        "unbelievable life-changing perfect wow buy buy buy",
        "incredible insane deal never seen anything like it",
        "obsessed with this awesome perfect amazing thing",
    ];

    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                LabeledReview::new(real_phrases[i % real_phrases.len()], Label::Real)
            } else {
                LabeledReview::new(fake_phrases[i % fake_phrases.len()], Label::Fake)
            }
        })
        .collect()
}

fn bench_normalization(c: &mut Criterion) {
    let analyzer = ReviewAnalyzer::new().unwrap();
    let text = "OMG this is literally the BEST amazing product ever!!! Must buy now, 10/10";

    let mut group = c.benchmark_group("normalization");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("normalize_review", |b| {
        b.iter(|| analyzer.normalize(black_box(text)).unwrap())
    });
    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let corpus = generate_corpus(64);
    let detector = Detector::train(DetectorConfig::default(), &corpus).unwrap();

    c.bench_function("analyze_review", |b| {
        b.iter(|| {
            detector
                .analyze(black_box("unbelievable amazing quality, must buy now wow"))
                .unwrap()
        })
    });
}

fn bench_training(c: &mut Criterion) {
    let corpus = generate_corpus(64);

    c.bench_function("train_detector_64_reviews", |b| {
        b.iter(|| Detector::train(DetectorConfig::default(), black_box(&corpus)).unwrap())
    });
}

criterion_group!(benches, bench_normalization, bench_analysis, bench_training);
criterion_main!(benches);
