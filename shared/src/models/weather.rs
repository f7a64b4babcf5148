//! Weather data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current conditions at a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: String,
    pub temperature: i32,
    pub humidity: i32,
    pub condition: String,
}

/// One raw forecast data point as delivered by the provider
///
/// Samples arrive as a flat, time-ordered sequence, typically 3-hour spaced
/// and spanning about 5 days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: Decimal,
    pub condition: String,
    /// Precipitation volume over the sample window; absent means none
    pub rain: Option<Decimal>,
}

/// One day's aggregated forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyForecast {
    /// Weekday name, e.g. "Monday"
    pub day: String,
    /// Short date, e.g. "Jan 8"
    pub date: String,
    pub temp: TempRange,
    /// Rounded percentage derived from the summed precipitation volumes
    pub precipitation: i32,
    /// Most frequent condition string for the day
    pub condition: String,
}

/// Rounded daily temperature range in degrees Celsius
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TempRange {
    pub min: i32,
    pub max: i32,
}

/// Severity tier of a forecast insight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// A derived advisory tied to one forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub day: String,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
}

/// Full weather report for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub insights: Vec<Insight>,
}
