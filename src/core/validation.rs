//! Shared argument validation helpers.
//!
//! Small checks reused by the training-history record and the preprocessing
//! configuration. Each returns a [`PrepError`] describing the violation.

use crate::core::errors::{PrepError, PrepResult};

/// Ensures a metric sequence is present (non-empty).
pub fn validate_non_empty(name: &'static str, len: usize) -> PrepResult<()> {
    if len == 0 {
        return Err(PrepError::MissingMetric { key: name });
    }
    Ok(())
}

/// Ensures a metric sequence matches the expected length.
pub fn validate_same_length(name: &'static str, expected: usize, actual: usize) -> PrepResult<()> {
    if expected != actual {
        return Err(PrepError::LengthMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Ensures both dimensions of a target size are positive.
pub fn validate_positive_dimensions(width: u32, height: u32) -> PrepResult<()> {
    if width == 0 || height == 0 {
        return Err(PrepError::invalid_input(format!(
            "target size must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("accuracy", 3).is_ok());
        assert!(matches!(
            validate_non_empty("accuracy", 0),
            Err(PrepError::MissingMetric { key: "accuracy" })
        ));
    }

    #[test]
    fn test_validate_same_length() {
        assert!(validate_same_length("loss", 4, 4).is_ok());
        let err = validate_same_length("loss", 4, 2).unwrap_err();
        assert!(matches!(
            err,
            PrepError::LengthMismatch {
                name: "loss",
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_validate_positive_dimensions() {
        assert!(validate_positive_dimensions(160, 160).is_ok());
        assert!(validate_positive_dimensions(0, 160).is_err());
        assert!(validate_positive_dimensions(160, 0).is_err());
    }
}
