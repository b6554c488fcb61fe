//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, VeracityArgs};
use crate::detector::Prediction;
use crate::error::Result;

/// Result structure for the train command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainOutcome {
    pub documents: usize,
    pub train_documents: usize,
    pub held_out_documents: usize,
    pub vocabulary_size: usize,
    pub held_out_accuracy: Option<f64>,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &VeracityArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &VeracityArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(&val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(&value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VeracityArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Print one prediction the way the interactive loop reports it.
pub fn print_prediction_human(prediction: &Prediction) {
    println!(
        "Prediction: {} (confidence: {:.2}%)",
        prediction.label,
        prediction.confidence * 100.0
    );
    println!("Hype words: {}", prediction.hype_score);

    for flag in &prediction.flags {
        match flag {
            crate::detector::Flag::LowConfidence => {
                println!("Warning: low model confidence, review may require a human check");
            }
            crate::detector::Flag::SuspiciousHypeForReal => {
                println!("Warning: high hype detected in a 'real' prediction");
            }
        }
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
