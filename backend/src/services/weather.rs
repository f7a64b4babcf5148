//! Weather forecast aggregation
//!
//! Converts the provider's flat 3-hourly sample sequence into at most seven
//! daily buckets plus up to three advisory insights. Everything here is
//! recomputed per request; nothing is cached or persisted.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::AppResult;
use crate::external::weather::WeatherClient;
use shared::models::{
    DailyForecast, ForecastSample, Insight, Severity, TempRange, WeatherReport,
};

/// Maximum number of day buckets retained from a forecast
const MAX_FORECAST_DAYS: usize = 7;

/// Maximum number of insights derived from a forecast
const MAX_INSIGHTS: usize = 3;

/// Weather service combining the provider client with forecast aggregation
#[derive(Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

/// Per-day accumulator used during the single aggregation pass
struct DayAccumulator {
    day: String,
    date: String,
    temps: Vec<Decimal>,
    conditions: Vec<String>,
    rain: Vec<Decimal>,
}

impl WeatherService {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Build a full weather report for a free-text location
    pub async fn weather_report(&self, location: &str) -> AppResult<WeatherReport> {
        let current = self.client.get_current(location).await?;
        let samples = self.client.get_forecast(location).await?;

        let forecast = aggregate_forecast(&samples);
        let insights = derive_insights(&forecast);

        Ok(WeatherReport {
            current,
            forecast,
            insights,
        })
    }
}

/// Group 3-hourly samples into daily buckets, in order of first appearance
///
/// Samples are keyed by weekday name derived from their timestamp. Once
/// seven distinct days have been seen, samples belonging to further days are
/// dropped; samples for already-seen days still accumulate. If the provider
/// delivers days out of chronological order, the first seven encountered are
/// kept, not necessarily the soonest seven.
pub fn aggregate_forecast(samples: &[ForecastSample]) -> Vec<DailyForecast> {
    let mut days: Vec<DayAccumulator> = Vec::new();

    for sample in samples {
        let day = sample.timestamp.format("%A").to_string();

        let idx = match days.iter().position(|d| d.day == day) {
            Some(idx) => idx,
            None => {
                if days.len() >= MAX_FORECAST_DAYS {
                    continue;
                }
                days.push(DayAccumulator {
                    day,
                    date: sample.timestamp.format("%b %-d").to_string(),
                    temps: Vec::new(),
                    conditions: Vec::new(),
                    rain: Vec::new(),
                });
                days.len() - 1
            }
        };

        let accum = &mut days[idx];
        accum.temps.push(sample.temperature);
        accum.conditions.push(sample.condition.clone());
        accum.rain.push(sample.rain.unwrap_or(Decimal::ZERO));
    }

    days.into_iter().map(summarize_day).collect()
}

fn summarize_day(accum: DayAccumulator) -> DailyForecast {
    let min = accum.temps.iter().copied().min().unwrap_or_default();
    let max = accum.temps.iter().copied().max().unwrap_or_default();
    let rain_sum: Decimal = accum.rain.iter().copied().sum();

    DailyForecast {
        day: accum.day,
        date: accum.date,
        temp: TempRange {
            min: round_to_i32(min),
            max: round_to_i32(max),
        },
        // Summed volumes scaled to a percentage; assumes the provider emits
        // fractional rates rather than raw millimeters
        precipitation: round_to_i32(rain_sum * Decimal::from(100)),
        condition: modal_condition(&accum.conditions),
    }
}

/// Most frequent condition string; ties resolve to the first encountered
/// under a strict "more occurrences" comparison
fn modal_condition(conditions: &[String]) -> String {
    let mut best = "";
    let mut best_count = 0usize;

    for condition in conditions {
        let count = conditions.iter().filter(|c| *c == condition).count();
        if count > best_count {
            best = condition;
            best_count = count;
        }
    }

    best.to_string()
}

/// Derive advisories for the first three forecast days
///
/// Rules are mutually exclusive and evaluated in priority order:
/// precipitation > 70 → danger; precipitation > 30 → warning; max > 40°C →
/// heat warning; max < 10°C → frost warning; otherwise info. Days beyond
/// the first three never produce insights, regardless of severity.
pub fn derive_insights(forecast: &[DailyForecast]) -> Vec<Insight> {
    forecast
        .iter()
        .take(MAX_INSIGHTS)
        .map(|day| {
            let (message, severity) = if day.precipitation > 70 {
                (
                    format!(
                        "{} expected - High risk for planting activities",
                        capitalize(&day.condition)
                    ),
                    Severity::Danger,
                )
            } else if day.precipitation > 30 {
                (
                    format!(
                        "{} expected - Moderate conditions, plan accordingly",
                        capitalize(&day.condition)
                    ),
                    Severity::Warning,
                )
            } else if day.temp.max > 40 {
                (
                    format!(
                        "High temperature ({}°C) expected - Risk of heat stress to crops",
                        day.temp.max
                    ),
                    Severity::Warning,
                )
            } else if day.temp.max < 10 {
                (
                    format!(
                        "Low temperature ({}°C) expected - Risk of frost damage",
                        day.temp.max
                    ),
                    Severity::Warning,
                )
            } else {
                (
                    format!(
                        "{} - Favorable conditions for farming activities",
                        capitalize(&day.condition)
                    ),
                    Severity::Info,
                )
            };

            Insight {
                day: day.day.clone(),
                message,
                severity,
            }
        })
        .collect()
}

/// Round half away from zero, matching the provider-facing contract
fn round_to_i32(value: Decimal) -> i32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn modal_condition_strictly_greater_wins() {
        let conditions: Vec<String> = ["Rain", "Sunny", "Sunny"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(modal_condition(&conditions), "Sunny");
    }

    #[test]
    fn modal_condition_tie_resolves_first_encountered() {
        let conditions: Vec<String> = ["Rain", "Sunny", "Rain", "Sunny"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(modal_condition(&conditions), "Rain");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_i32(dec("22.5")), 23);
        assert_eq!(round_to_i32(dec("22.4")), 22);
        assert_eq!(round_to_i32(dec("-0.5")), -1);
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Sunny"), "Sunny");
    }
}
