//! Review detector: the train-once, serve-many inference engine.
//!
//! [`Detector::train`] consumes a labeled corpus and produces an immutable
//! fitted detector; [`Detector::analyze`] scores one review at a time and
//! may be called concurrently from any number of threads.

pub mod config;
pub mod engine;
pub mod prediction;

pub use config::{DetectorConfig, TrainConfig, VerdictConfig};
pub use engine::{Detector, TrainingReport, advisory_flags};
pub use prediction::{Flag, Prediction};
