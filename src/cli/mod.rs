//! Command-line interface for Veracity.

pub mod args;
pub mod commands;
pub mod output;
