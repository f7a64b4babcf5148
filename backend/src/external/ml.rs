//! ML inference service client
//!
//! Client for the RootCause ML microservice: image-based crop disease
//! classification and tabular yield regression. Images are carried as
//! base64 in a JSON body.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::MlConfig;
use shared::models::{DiseasePrediction, YieldPrediction};

/// Errors from the ML service, kept distinct so callers can decide between
/// degrading to a placeholder and surfacing a client error
#[derive(Debug)]
pub enum MlError {
    /// The service could not be reached at all
    Unreachable(String),
    /// The service rejected the input (e.g. unknown crop or district)
    InvalidInput(String),
    /// Any other upstream failure
    Upstream(String),
}

/// Client for the ML inference microservice
#[derive(Clone)]
pub struct MlClient {
    http_client: Client,
    base_url: String,
    disease_timeout: Duration,
    yield_timeout: Duration,
}

/// Request body for disease classification
#[derive(Debug, Serialize)]
struct DiseaseRequest {
    image_base64: String,
    filename: String,
}

/// Request body for yield regression
///
/// Field names match what the model service expects.
#[derive(Debug, Serialize)]
pub struct YieldRequest {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Year")]
    pub year: i32,
}

impl MlClient {
    /// Create a new ML client from configuration
    pub fn new(config: &MlConfig) -> Self {
        Self {
            http_client: Client::new(),
            base_url: config.service_url.clone(),
            disease_timeout: Duration::from_secs(config.disease_timeout_secs),
            yield_timeout: Duration::from_secs(config.yield_timeout_secs),
        }
    }

    /// Classify a crop image
    pub async fn predict_disease(
        &self,
        image: &[u8],
        filename: &str,
    ) -> Result<DiseasePrediction, MlError> {
        let body = DiseaseRequest {
            image_base64: BASE64.encode(image),
            filename: filename.to_string(),
        };

        let url = format!("{}/predict-disease", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .timeout(self.disease_timeout)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        Self::read_response(response).await
    }

    /// Predict crop yield from tabular inputs
    pub async fn predict_yield(&self, request: &YieldRequest) -> Result<YieldPrediction, MlError> {
        let url = format!("{}/predict-yield", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .timeout(self.yield_timeout)
            .json(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        Self::read_response(response).await
    }

    async fn read_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MlError> {
        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST {
            let detail = response.text().await.unwrap_or_default();
            return Err(MlError::InvalidInput(detail));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MlError::Upstream(format!("{}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| MlError::Upstream(format!("Failed to parse response: {}", e)))
    }
}

/// Connection-level failures degrade to a simulated response; everything
/// else, including timeouts, surfaces as an upstream error.
fn classify_transport_error(error: reqwest::Error) -> MlError {
    if error.is_connect() {
        MlError::Unreachable(error.to_string())
    } else {
        MlError::Upstream(error.to_string())
    }
}
