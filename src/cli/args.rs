//! Command line argument parsing for the Veracity CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Veracity - a batch-trained fake review detector
#[derive(Parser, Debug, Clone)]
#[command(name = "veracity")]
#[command(about = "A batch-trained fake review detector for Rust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VeracityArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VeracityArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a detector and report held-out accuracy
    Train(TrainArgs),

    /// Train a detector, then score review text
    Analyze(AnalyzeArgs),
}

/// Model options shared by training commands
#[derive(Parser, Debug, Clone)]
pub struct ModelArgs {
    /// Labeled corpus file (JSONL, one {"text": ..., "label": ...} per line)
    #[arg(short, long, value_name = "DATASET_FILE", env = "VERACITY_DATASET")]
    pub dataset: PathBuf,

    /// Maximum number of vocabulary terms
    #[arg(long, default_value = "8000")]
    pub max_features: usize,

    /// Number of trees in the random forest
    #[arg(long, default_value = "100")]
    pub trees: usize,

    /// Seed for the stratified split and forest resampling
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for the analyze command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Review text to score; omit for an interactive loop
    #[arg(short, long)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_command() {
        let args =
            VeracityArgs::parse_from(["veracity", "train", "--dataset", "reviews.jsonl"]);

        match args.command {
            Command::Train(train) => {
                assert_eq!(train.model.dataset, PathBuf::from("reviews.jsonl"));
                assert_eq!(train.model.max_features, 8000);
                assert_eq!(train.model.trees, 100);
                assert_eq!(train.model.seed, 42);
            }
            _ => panic!("expected train command"),
        }
    }

    #[test]
    fn test_parse_analyze_command_with_text() {
        let args = VeracityArgs::parse_from([
            "veracity",
            "analyze",
            "--dataset",
            "reviews.jsonl",
            "--text",
            "amazing must buy",
        ]);

        match args.command {
            Command::Analyze(analyze) => {
                assert_eq!(analyze.text.as_deref(), Some("amazing must buy"));
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_verbosity() {
        let args =
            VeracityArgs::parse_from(["veracity", "-q", "train", "--dataset", "d.jsonl"]);
        assert_eq!(args.verbosity(), 0);

        let args =
            VeracityArgs::parse_from(["veracity", "-vv", "train", "--dataset", "d.jsonl"]);
        assert_eq!(args.verbosity(), 2);
    }
}
