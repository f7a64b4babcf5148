//! Prediction service wrapping the ML inference client
//!
//! Applies the degrade-not-fail policy: when the ML service is unreachable
//! the caller receives a clearly flagged simulated placeholder instead of an
//! error. Bad input, by contrast, always surfaces as a client error.

use crate::error::{AppError, AppResult};
use crate::external::ml::{MlClient, MlError, YieldRequest};
use shared::models::{DegradedReason, DiseasePrediction, PredictionOutcome, YieldPrediction};
use shared::validation;

/// ML prediction service
#[derive(Clone)]
pub struct PredictionService {
    ml: MlClient,
}

/// Input for yield prediction
#[derive(Debug, serde::Deserialize)]
pub struct YieldInput {
    pub crop: String,
    pub district: String,
    pub year: i32,
}

impl PredictionService {
    pub fn new(ml: MlClient) -> Self {
        Self { ml }
    }

    /// Classify a crop image, degrading to a placeholder if the ML service
    /// is unreachable
    pub async fn detect_disease(
        &self,
        image: &[u8],
        filename: &str,
    ) -> AppResult<PredictionOutcome<DiseasePrediction>> {
        if image.is_empty() {
            return Err(AppError::ValidationError(
                "Image file is required".to_string(),
            ));
        }

        match self.ml.predict_disease(image, filename).await {
            Ok(prediction) => Ok(PredictionOutcome::Model(prediction)),
            Err(MlError::Unreachable(detail)) => {
                tracing::warn!("ML service unreachable, serving placeholder: {}", detail);
                Ok(PredictionOutcome::Degraded {
                    placeholder: simulated_disease(),
                    reason: DegradedReason::ServiceUnreachable,
                })
            }
            Err(MlError::InvalidInput(detail)) => Err(AppError::ValidationError(detail)),
            Err(MlError::Upstream(detail)) => Err(AppError::MlServiceError(detail)),
        }
    }

    /// Predict crop yield, degrading to a placeholder if the ML service is
    /// unreachable
    pub async fn predict_yield(
        &self,
        input: YieldInput,
    ) -> AppResult<PredictionOutcome<YieldPrediction>> {
        if input.crop.trim().is_empty() || input.district.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Crop, district, and year are required".to_string(),
            ));
        }
        validation::validate_crop_year(input.year)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        let request = YieldRequest {
            crop: input.crop,
            district: input.district,
            year: input.year,
        };

        match self.ml.predict_yield(&request).await {
            Ok(prediction) => Ok(PredictionOutcome::Model(prediction)),
            Err(MlError::Unreachable(detail)) => {
                tracing::warn!("ML service unreachable, serving placeholder: {}", detail);
                Ok(PredictionOutcome::Degraded {
                    placeholder: simulated_yield(),
                    reason: DegradedReason::ServiceUnreachable,
                })
            }
            Err(MlError::InvalidInput(detail)) => Err(AppError::Validation {
                field: "crop".to_string(),
                message: format!(
                    "Invalid crop or district name. Please select from the available options. ({})",
                    detail
                ),
                message_hi: "फसल या जिले का नाम मान्य नहीं है".to_string(),
            }),
            Err(MlError::Upstream(detail)) => Err(AppError::MlServiceError(detail)),
        }
    }
}

/// Fixed disease placeholder; the degraded flag carries the provenance
fn simulated_disease() -> DiseasePrediction {
    DiseasePrediction {
        disease: "Healthy".to_string(),
        confidence: 0.5,
    }
}

/// Fixed yield placeholder; the degraded flag carries the provenance
fn simulated_yield() -> YieldPrediction {
    YieldPrediction {
        predicted_yield: 1000.0,
        unit: "hg/ha".to_string(),
    }
}
