//! Error types shared by the preprocessing pipeline and the chart renderer.
//!
//! All recoverable failure modes in this crate surface as [`PrepError`].
//! Batch-level policy (skip the image, abort the render) is decided by the
//! caller; the error type only records what went wrong.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preprocessing a dataset or rendering a chart.
#[derive(Debug, Error)]
pub enum PrepError {
    /// An input image could not be decoded.
    #[error("failed to load image")]
    ImageLoad(#[source] image::ImageError),

    /// An output image could not be encoded or written.
    #[error("failed to save image to {path}")]
    ImageSave {
        /// Destination path of the failed write.
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The caller supplied structurally invalid input (bad directory, zero
    /// target size, inverted threshold bounds).
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// A required metric sequence is absent or empty in a training history.
    #[error("missing or empty metric sequence '{key}' in training history")]
    MissingMetric {
        /// Name of the absent metric key.
        key: &'static str,
    },

    /// A metric sequence does not match the length of the others.
    #[error("metric sequence '{name}' has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Name of the offending metric key.
        name: &'static str,
        /// Expected sequence length (taken from `accuracy`).
        expected: usize,
        /// Actual sequence length.
        actual: usize,
    },

    /// Filesystem error during directory traversal or creation.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// A training history record could not be parsed.
    #[error("failed to parse training history")]
    Json(#[from] serde_json::Error),
}

impl PrepError {
    /// Creates an [`PrepError::InvalidInput`] from any displayable message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PrepError::InvalidInput {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type PrepResult<T> = Result<T, PrepError>;
