//! Dataset preprocessing CLI.
//!
//! Crops the pink marker region out of every photograph in a class-labelled
//! dataset and resizes the crops to a fixed resolution, mirroring the class
//! directory structure into the output directory.
//!
//! # Usage
//!
//! ```bash
//! preprocess <DATA_DIR> <OUTPUT_DIR> [--pad N] [--target-size N]
//! ```
//!
//! Unreadable images and images without a detectable marker are logged and
//! skipped; the run still exits 0.

use std::path::PathBuf;

use clap::Parser;
use sign_prep::{PreprocessConfig, Preprocessor};
use tracing::info;

/// Command-line arguments for the preprocessing run.
#[derive(Parser)]
#[command(name = "preprocess")]
#[command(about = "Preprocess a hand-sign dataset by cropping the marker region and resizing")]
struct Args {
    /// Path to the raw dataset directory (one subdirectory per class)
    data_dir: PathBuf,

    /// Path to save the preprocessed dataset
    output_dir: PathBuf,

    /// Padding in pixels added around the detected marker box
    #[arg(long, default_value_t = 10)]
    pad: u32,

    /// Output resolution (square) in pixels
    #[arg(long, default_value_t = 160)]
    target_size: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    sign_prep::utils::init_tracing();
    let args = Args::parse();

    let config = PreprocessConfig {
        pad: args.pad,
        target_size: (args.target_size, args.target_size),
        ..Default::default()
    };
    let preprocessor = Preprocessor::new(config)?;

    info!(
        "preprocessing {} -> {}",
        args.data_dir.display(),
        args.output_dir.display()
    );
    let summary = preprocessor.run(&args.data_dir, &args.output_dir)?;

    info!(
        "done: {} images written ({} unreadable, {} without marker)",
        summary.processed, summary.skipped_unreadable, summary.skipped_no_marker
    );
    Ok(())
}
