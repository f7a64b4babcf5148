//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap API for current conditions and the
//! 5-day / 3-hourly forecast, looked up by free-text location name.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::models::{CurrentConditions, ForecastSample};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: i32,
}

/// OpenWeatherMap API response for the 3-hourly forecast
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch current conditions for a free-text location
    pub async fn get_current(&self, location: &str) -> AppResult<CurrentConditions> {
        let url = format!("{}/weather", self.base_url);
        let data: OwmCurrentResponse = self.fetch(&url, location).await?;

        Ok(CurrentConditions {
            location: location.to_string(),
            temperature: round_temp(data.main.temp),
            humidity: data.main.humidity,
            condition: data
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default(),
        })
    }

    /// Fetch the raw 3-hourly forecast sample sequence for a location
    pub async fn get_forecast(&self, location: &str) -> AppResult<Vec<ForecastSample>> {
        let url = format!("{}/forecast", self.base_url);
        let data: OwmForecastResponse = self.fetch(&url, location).await?;

        let samples = data
            .list
            .into_iter()
            .map(|item| ForecastSample {
                timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                temperature: Decimal::from_f64_retain(item.main.temp).unwrap_or_default(),
                condition: item
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .unwrap_or_default(),
                rain: item
                    .rain
                    .and_then(|r| r.three_hour)
                    .map(|v| Decimal::from_f64_retain(v).unwrap_or_default()),
            })
            .collect();

        Ok(samples)
    }

    /// Query parameters shared by both provider endpoints; the free-text
    /// location goes through the query builder so reserved characters are
    /// percent-encoded rather than spliced into the URL
    fn location_query<'a>(&'a self, location: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("q", location),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]
    }

    /// Issue a GET request and map provider failures to application errors
    ///
    /// A provider 404 means the location was not recognized and propagates
    /// distinctly from transport failures.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        location: &str,
    ) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .query(&self.location_query(location))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e);
                AppError::WeatherServiceUnavailable
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!("Location '{}'", location)));
            }
            StatusCode::UNAUTHORIZED => {
                return Err(AppError::Internal("Invalid weather API key".to_string()));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("Weather API error: {} - {}", status, body);
                return Err(AppError::WeatherServiceUnavailable);
            }
            _ => {}
        }

        response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse weather response: {}", e);
            AppError::WeatherServiceUnavailable
        })
    }
}

fn round_temp(temp: f64) -> i32 {
    Decimal::from_f64_retain(temp)
        .unwrap_or_default()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}
