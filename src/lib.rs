//! Dataset preprocessing and training-curve rendering for hand-sign image classifiers.
//!
//! This crate bundles two independent batch utilities:
//!
//! - A marker-crop transform ([`pipeline::Preprocessor`]) that detects the pink
//!   marker region in each photograph of a class-labelled dataset, crops a padded
//!   bounding box around it, resizes the crop to a fixed resolution, and writes
//!   the result into a mirrored output directory tree.
//! - A training-curve renderer ([`chart`]) that turns per-epoch accuracy and loss
//!   sequences into a two-panel chart image with the best validation epoch
//!   annotated on each panel.
//!
//! The two pipelines share no state; each is a straight-line transform over
//! `image`/`imageproc` primitives.

pub mod chart;
pub mod core;
pub mod pipeline;
pub mod processors;
pub mod utils;

pub use chart::{BestEpoch, ChartStyle, TrainingHistory};
pub use core::{PrepError, PrepResult};
pub use pipeline::{PreprocessConfig, PreprocessSummary, Preprocessor};
pub use processors::{HsvRange, MarkerBox, detect_marker};
