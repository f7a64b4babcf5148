//! Weather report handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;
use crate::services::WeatherService;
use crate::AppState;
use shared::models::WeatherReport;

/// Fetch and aggregate the weather report for a location
pub async fn get_weather_report(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> AppResult<Json<WeatherReport>> {
    let weather = &state.config.weather;
    if weather.api_key.is_empty() {
        return Err(AppError::Configuration(
            "Weather API key not configured".to_string(),
        ));
    }

    let client = WeatherClient::new(weather.api_key.clone(), weather.api_endpoint.clone());
    let service = WeatherService::new(client);
    let report = service.weather_report(&location).await?;
    Ok(Json(report))
}
