//! Training-curve rendering CLI.
//!
//! Reads a JSON training history with the keys `accuracy`, `val_accuracy`,
//! `loss`, and `val_loss`, and renders a two-panel chart with the best
//! validation epoch annotated on each panel.
//!
//! # Usage
//!
//! ```bash
//! plot-history <HISTORY_JSON> <OUTPUT_IMAGE> [--title TITLE]
//! ```
//!
//! A history with a missing or mismatched metric sequence aborts with a
//! non-zero exit status.

use std::path::PathBuf;

use clap::Parser;
use sign_prep::chart::{self, ChartStyle, TrainingHistory};

/// Command-line arguments for the chart render.
#[derive(Parser)]
#[command(name = "plot-history")]
#[command(about = "Render training/validation accuracy and loss curves to an image")]
struct Args {
    /// Path to the JSON training history file
    history: PathBuf,

    /// Path of the output chart image (extension selects the format)
    output: PathBuf,

    /// Title drawn above both panels
    #[arg(long, default_value = "Training and Validation Accuracy & Loss")]
    title: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    sign_prep::utils::init_tracing();
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.history)?;
    let history: TrainingHistory = serde_json::from_str(&raw)?;

    let style = ChartStyle {
        title: args.title,
        ..Default::default()
    };
    chart::render_history_to_file(&history, &style, &args.output)?;
    Ok(())
}
