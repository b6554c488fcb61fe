//! Command implementations for the Veracity CLI.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::cli::args::{AnalyzeArgs, Command, ModelArgs, TrainArgs, VeracityArgs};
use crate::cli::output::{TrainOutcome, output_result, print_prediction_human};
use crate::dataset;
use crate::detector::{Detector, DetectorConfig};
use crate::error::{Result, VeracityError};

/// Execute a CLI command.
pub fn execute_command(args: VeracityArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), &args),
    }
}

/// Build a detector configuration from CLI model options.
fn detector_config(model: &ModelArgs) -> DetectorConfig {
    let mut config = DetectorConfig::default();
    config.vectorizer.max_features = model.max_features;
    config.training.seed = model.seed;
    config.training.ensemble.forest.n_trees = model.trees;
    config.training.ensemble.forest.seed = model.seed;
    config
}

/// Load the corpus and train a detector.
fn train_detector(model: &ModelArgs, cli_args: &VeracityArgs) -> Result<(Detector, u64)> {
    if cli_args.verbosity() > 0 {
        println!("Loading dataset from: {}", model.dataset.display());
    }

    let corpus = dataset::load_jsonl(&model.dataset)?;

    if cli_args.verbosity() > 1 {
        println!("Loaded {} labeled reviews", corpus.len());
    }
    if cli_args.verbosity() > 0 {
        println!("Training...");
    }

    let start_time = Instant::now();
    let detector = Detector::train(detector_config(model), &corpus)?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    Ok((detector, duration_ms))
}

/// Train a detector and report its held-out accuracy.
fn train(args: TrainArgs, cli_args: &VeracityArgs) -> Result<()> {
    let (detector, duration_ms) = train_detector(&args.model, cli_args)?;
    let report = detector.report();

    output_result(
        "Training complete",
        &TrainOutcome {
            documents: report.documents,
            train_documents: report.train_documents,
            held_out_documents: report.held_out_documents,
            vocabulary_size: report.vocabulary_size,
            held_out_accuracy: report.held_out_accuracy,
            duration_ms,
        },
        cli_args,
    )?;

    Ok(())
}

/// Train a detector, then score a single text or run the interactive loop.
fn analyze(args: AnalyzeArgs, cli_args: &VeracityArgs) -> Result<()> {
    let (detector, _) = train_detector(&args.model, cli_args)?;

    match &args.text {
        Some(text) => {
            let prediction = detector.analyze(text)?;
            output_result("Analysis complete", &prediction, cli_args)?;
            Ok(())
        }
        None => interactive_loop(&detector, cli_args),
    }
}

/// Read reviews from stdin and print a verdict per line until "exit".
fn interactive_loop(detector: &Detector, cli_args: &VeracityArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Type a product review to check. Type 'exit' to quit.");
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Review: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match detector.analyze(input) {
            Ok(prediction) => print_prediction_human(&prediction),
            Err(VeracityError::EmptyInput) => {
                println!("Review is empty after normalization.");
            }
            Err(e) => return Err(e),
        }

        println!();
    }

    Ok(())
}
