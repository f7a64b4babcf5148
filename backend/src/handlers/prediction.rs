//! ML prediction handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::external::MlClient;
use crate::services::prediction::YieldInput;
use crate::services::PredictionService;
use crate::AppState;
use shared::models::{DiseasePrediction, PredictionOutcome, YieldPrediction};

/// Prediction response with provenance flag
///
/// `simulated` is true when the ML service was unreachable and a placeholder
/// was served; `degraded_reason` then explains why.
#[derive(Debug, Serialize)]
pub struct PredictionResponse<T: Serialize> {
    #[serde(flatten)]
    pub prediction: T,
    pub simulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

impl<T: Serialize> From<PredictionOutcome<T>> for PredictionResponse<T> {
    fn from(outcome: PredictionOutcome<T>) -> Self {
        match outcome {
            PredictionOutcome::Model(prediction) => PredictionResponse {
                prediction,
                simulated: false,
                degraded_reason: None,
            },
            PredictionOutcome::Degraded {
                placeholder,
                reason,
            } => PredictionResponse {
                prediction: placeholder,
                simulated: true,
                degraded_reason: Some(reason.describe().to_string()),
            },
        }
    }
}

/// Disease detection endpoint handler (multipart image upload)
pub async fn predict_disease(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<PredictionResponse<DiseasePrediction>>> {
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::ValidationError(format!("Failed to read upload: {}", e)))?;
            image = Some((bytes.to_vec(), filename));
        }
    }

    let (bytes, filename) =
        image.ok_or_else(|| AppError::ValidationError("Image file is required".to_string()))?;

    let service = PredictionService::new(MlClient::new(&state.config.ml));
    let outcome = service.detect_disease(&bytes, &filename).await?;
    Ok(Json(outcome.into()))
}

/// Yield prediction endpoint handler
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(input): Json<YieldInput>,
) -> AppResult<Json<PredictionResponse<YieldPrediction>>> {
    let service = PredictionService::new(MlClient::new(&state.config.ml));
    let outcome = service.predict_yield(input).await?;
    Ok(Json(outcome.into()))
}
