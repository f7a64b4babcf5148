//! ML prediction models

use serde::{Deserialize, Serialize};

/// Result of image-based crop disease classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseasePrediction {
    pub disease: String,
    /// Model confidence in [0, 1]
    pub confidence: f64,
}

/// Result of tabular crop yield regression
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldPrediction {
    pub predicted_yield: f64,
    pub unit: String,
}

/// Why a prediction was served from a placeholder instead of the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// The ML inference service could not be reached
    ServiceUnreachable,
}

impl DegradedReason {
    pub fn describe(&self) -> &'static str {
        match self {
            DegradedReason::ServiceUnreachable => {
                "ML service unavailable - using simulated response"
            }
        }
    }
}

/// Outcome of an ML call: a genuine model prediction, or a clearly flagged
/// simulated placeholder when the service was unreachable.
///
/// Callers branch on the variant rather than inspecting message strings.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome<T> {
    Model(T),
    Degraded { placeholder: T, reason: DegradedReason },
}

impl<T> PredictionOutcome<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, PredictionOutcome::Degraded { .. })
    }

    /// The prediction payload, regardless of provenance
    pub fn data(&self) -> &T {
        match self {
            PredictionOutcome::Model(data) => data,
            PredictionOutcome::Degraded { placeholder, .. } => placeholder,
        }
    }
}
