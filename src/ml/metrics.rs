//! Multi-label evaluation metrics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReeltagError, Result};

/// Micro-averaged precision, recall and F1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1")]
    pub f1: f64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Precision: {:.4}  Recall: {:.4}  F1: {:.4}",
            self.precision, self.recall, self.f1
        )
    }
}

/// True/false positive and false negative counts over label-example pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    /// Accumulate counts from indicator matrices of equal shape.
    pub fn from_indicators(truth: &[Vec<bool>], predicted: &[Vec<bool>]) -> Result<Self> {
        if truth.len() != predicted.len() {
            return Err(ReeltagError::invalid_input(format!(
                "{} true rows but {} predicted rows",
                truth.len(),
                predicted.len()
            )));
        }

        let mut counts = ConfusionCounts::default();
        for (t_row, p_row) in truth.iter().zip(predicted) {
            if t_row.len() != p_row.len() {
                return Err(ReeltagError::invalid_input(
                    "indicator rows have different widths",
                ));
            }
            for (&t, &p) in t_row.iter().zip(p_row) {
                match (t, p) {
                    (true, true) => counts.true_positives += 1,
                    (false, true) => counts.false_positives += 1,
                    (true, false) => counts.false_negatives += 1,
                    (false, false) => {}
                }
            }
        }
        Ok(counts)
    }

    pub fn stats(&self) -> Stats {
        let tp = self.true_positives as f64;
        let precision = ratio(tp, tp + self.false_positives as f64);
        let recall = ratio(tp, tp + self.false_negatives as f64);
        let f1 = ratio(2.0 * precision * recall, precision + recall);
        Stats {
            precision,
            recall,
            f1,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Micro-averaged stats of `predicted` against `truth`.
pub fn micro_stats(truth: &[Vec<bool>], predicted: &[Vec<bool>]) -> Result<Stats> {
    Ok(ConfusionCounts::from_indicators(truth, predicted)?.stats())
}
