//! Core building blocks shared by both pipelines.
//!
//! This module contains the error taxonomy and the small validation helpers
//! used by the preprocessing configuration and the training-history record.

pub mod errors;
pub mod validation;

pub use errors::{PrepError, PrepResult};
pub use validation::{validate_non_empty, validate_positive_dimensions, validate_same_length};
