use serde::{Deserialize, Serialize};
use crate::common::DetectionResult;

/// Aggregate statistics over a list of confidence scores.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    pub average: f32,
    pub maximum: f32,
    pub minimum: f32,
    pub standard_deviation: f32,
}

impl ConfidenceSummary {
    /// Summarizes `scores`. An empty slice gives an all-zero summary.
    ///
    /// The deviation is the population one (divides by `n`, not `n - 1`).
    pub fn summarize(scores: &[f32]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }

        let n = scores.len() as f32;
        let average = scores.iter().sum::<f32>() / n;
        let maximum = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let minimum = scores.iter().copied().fold(f32::INFINITY, f32::min);
        let variance = scores
            .iter()
            .map(|s| (s - average).powi(2))
            .sum::<f32>() / n;

        Self {
            average,
            maximum,
            minimum,
            standard_deviation: variance.sqrt(),
        }
    }

    pub fn from_detections(detections: &[DetectionResult]) -> Self {
        let scores: Vec<f32> = detections.iter().map(|d| d.confidence).collect();
        Self::summarize(&scores)
    }
}
