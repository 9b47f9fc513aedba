//! Training-history records and best-epoch computation.
//!
//! A [`TrainingHistory`] carries the four per-epoch metric sequences emitted
//! by a training loop. The renderer in [`render`] turns one into a two-panel
//! chart with the best validation epoch annotated on each panel.

pub mod render;

pub use render::{ChartStyle, render_history, render_history_to_file};

use serde::{Deserialize, Serialize};

use crate::core::errors::PrepResult;
use crate::core::validation::{validate_non_empty, validate_same_length};

/// Per-epoch training and validation metrics, indexed by epoch (1-based).
///
/// The serde field names match the collaborator record keys (`accuracy`,
/// `val_accuracy`, `loss`, `val_loss`), so a JSON history with a missing key
/// fails to deserialize rather than producing a partial record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    /// Training accuracy per epoch.
    pub accuracy: Vec<f64>,
    /// Validation accuracy per epoch.
    pub val_accuracy: Vec<f64>,
    /// Training loss per epoch.
    pub loss: Vec<f64>,
    /// Validation loss per epoch.
    pub val_loss: Vec<f64>,
}

/// The best value of a validation metric and the 1-based epoch it occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestEpoch {
    /// 1-based epoch index.
    pub epoch: usize,
    /// Metric value at that epoch.
    pub value: f64,
}

impl TrainingHistory {
    /// Creates a history from the four metric sequences.
    pub fn new(
        accuracy: Vec<f64>,
        val_accuracy: Vec<f64>,
        loss: Vec<f64>,
        val_loss: Vec<f64>,
    ) -> Self {
        Self {
            accuracy,
            val_accuracy,
            loss,
            val_loss,
        }
    }

    /// Number of recorded epochs.
    pub fn epochs(&self) -> usize {
        self.accuracy.len()
    }

    /// Checks the record invariant: all four sequences non-empty and of
    /// equal length.
    pub fn validate(&self) -> PrepResult<()> {
        validate_non_empty("accuracy", self.accuracy.len())?;
        let expected = self.accuracy.len();
        validate_same_length("val_accuracy", expected, self.val_accuracy.len())?;
        validate_same_length("loss", expected, self.loss.len())?;
        validate_same_length("val_loss", expected, self.val_loss.len())?;
        Ok(())
    }

    /// Highest validation accuracy and its epoch (first occurrence on ties).
    ///
    /// Returns `None` for an empty history.
    pub fn best_accuracy(&self) -> Option<BestEpoch> {
        best_by(&self.val_accuracy, |candidate, best| candidate > best)
    }

    /// Lowest validation loss and its epoch (first occurrence on ties).
    ///
    /// Returns `None` for an empty history.
    pub fn best_loss(&self) -> Option<BestEpoch> {
        best_by(&self.val_loss, |candidate, best| candidate < best)
    }
}

fn best_by(values: &[f64], better: impl Fn(f64, f64) -> bool) -> Option<BestEpoch> {
    let mut best = BestEpoch {
        epoch: 1,
        value: *values.first()?,
    };
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if better(value, best.value) {
            best = BestEpoch {
                epoch: idx + 1,
                value,
            };
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::PrepError;

    fn history(val_accuracy: Vec<f64>, val_loss: Vec<f64>) -> TrainingHistory {
        let n = val_accuracy.len();
        TrainingHistory::new(vec![0.0; n], val_accuracy, vec![0.0; n], val_loss)
    }

    #[test]
    fn test_best_accuracy_picks_max() {
        let h = history(vec![0.5, 0.9, 0.7], vec![1.0, 0.5, 0.4]);
        let best = h.best_accuracy().unwrap();
        assert_eq!(best.epoch, 2);
        assert_eq!(best.value, 0.9);
    }

    #[test]
    fn test_best_loss_picks_min() {
        let h = history(vec![0.1, 0.2, 0.3], vec![1.0, 0.2, 0.5]);
        let best = h.best_loss().unwrap();
        assert_eq!(best.epoch, 2);
        assert_eq!(best.value, 0.2);
    }

    #[test]
    fn test_ties_keep_first_epoch() {
        let h = history(vec![0.9, 0.9, 0.5], vec![0.3, 0.1, 0.1]);
        assert_eq!(h.best_accuracy().unwrap().epoch, 1);
        assert_eq!(h.best_loss().unwrap().epoch, 2);
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let h = TrainingHistory::new(vec![0.1, 0.2], vec![0.1], vec![0.5, 0.4], vec![0.5, 0.4]);
        assert!(matches!(
            h.validate(),
            Err(PrepError::LengthMismatch {
                name: "val_accuracy",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let h = TrainingHistory::new(vec![], vec![], vec![], vec![]);
        assert!(matches!(h.validate(), Err(PrepError::MissingMetric { .. })));
    }

    #[test]
    fn test_missing_key_fails_deserialization() {
        let json = r#"{"accuracy": [0.5], "val_accuracy": [0.6], "loss": [1.2]}"#;
        let result: Result<TrainingHistory, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_full_record_deserializes() {
        let json = r#"{
            "accuracy": [0.5, 0.8],
            "val_accuracy": [0.4, 0.7],
            "loss": [1.2, 0.6],
            "val_loss": [1.3, 0.8]
        }"#;
        let h: TrainingHistory = serde_json::from_str(json).unwrap();
        assert_eq!(h.epochs(), 2);
        assert!(h.validate().is_ok());
    }
}
