//! Weather aggregation tests
//!
//! Exercises day bucketing, min/max/precipitation summarization, modal
//! condition selection, and insight derivation.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use rootcause_backend::services::weather::{aggregate_forecast, derive_insights};
use shared::models::{ForecastSample, Severity};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Build a sample at the given day/hour in January 2024 (Jan 8 is a Monday)
fn sample(day: u32, hour: u32, temp: &str, condition: &str, rain: Option<&str>) -> ForecastSample {
    ForecastSample {
        timestamp: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
        temperature: dec(temp),
        condition: condition.to_string(),
        rain: rain.map(dec),
    }
}

// ============================================================================
// Bucketing
// ============================================================================

#[test]
fn empty_sample_sequence_yields_empty_outputs() {
    let forecast = aggregate_forecast(&[]);
    assert!(forecast.is_empty());
    assert!(derive_insights(&forecast).is_empty());
}

#[test]
fn samples_group_by_weekday_in_first_seen_order() {
    let samples = vec![
        sample(8, 0, "22.0", "Sunny", None),
        sample(8, 3, "25.0", "Sunny", None),
        sample(9, 0, "20.0", "Rain", Some("0.4")),
        sample(9, 3, "21.0", "Rain", Some("0.1")),
    ];

    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast.len(), 2);
    assert_eq!(forecast[0].day, "Monday");
    assert_eq!(forecast[0].date, "Jan 8");
    assert_eq!(forecast[1].day, "Tuesday");
    assert_eq!(forecast[1].date, "Jan 9");
}

#[test]
fn at_most_seven_day_buckets_are_produced() {
    // Eight consecutive days; the eighth shares a weekday name with the
    // first, so its samples fold into that bucket rather than opening a new
    // one
    let samples: Vec<ForecastSample> = (8..=15)
        .map(|day| sample(day, 12, if day == 15 { "35.0" } else { "25.0" }, "Sunny", None))
        .collect();

    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast.len(), 7);

    // Jan 15 (Monday) merged into the Jan 8 (Monday) bucket
    assert_eq!(forecast[0].day, "Monday");
    assert_eq!(forecast[0].temp.max, 35);
}

#[test]
fn min_max_are_rounded_per_day() {
    let samples = vec![
        sample(8, 0, "22.4", "Sunny", None),
        sample(8, 6, "27.5", "Sunny", None),
        sample(8, 12, "24.0", "Sunny", None),
    ];

    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast[0].temp.min, 22);
    assert_eq!(forecast[0].temp.max, 28);
}

#[test]
fn precipitation_is_summed_and_scaled_to_percent() {
    let samples = vec![
        sample(8, 0, "22.0", "Rain", Some("0.1")),
        sample(8, 3, "22.0", "Rain", Some("0.25")),
        sample(8, 6, "22.0", "Rain", None), // absent rain counts as zero
    ];

    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast[0].precipitation, 35);
}

#[test]
fn modal_condition_tie_resolves_first_encountered() {
    let mut samples = Vec::new();
    for i in 0..10 {
        let condition = if i % 2 == 0 { "Sunny" } else { "Rain" };
        samples.push(sample(8, 0, "22.0", condition, None));
    }

    // 5 "Sunny" vs 5 "Rain": the first-encountered string wins
    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast[0].condition, "Sunny");
}

#[test]
fn modal_condition_majority_wins() {
    let samples = vec![
        sample(8, 0, "22.0", "Rain", None),
        sample(8, 3, "22.0", "Sunny", None),
        sample(8, 6, "22.0", "Sunny", None),
    ];

    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast[0].condition, "Sunny");
}

// ============================================================================
// Insights
// ============================================================================

#[test]
fn insight_severities_follow_precipitation_thresholds() {
    // Three days with precipitation sums 0.9, 0.2, 0.05 and mild
    // temperatures: severities must be danger, info, info
    let samples = vec![
        sample(8, 0, "25.0", "Heavy rain", Some("0.9")),
        sample(9, 0, "25.0", "Cloudy", Some("0.2")),
        sample(10, 0, "25.0", "Sunny", Some("0.05")),
    ];

    let forecast = aggregate_forecast(&samples);
    let insights = derive_insights(&forecast);

    assert_eq!(insights.len(), 3);
    assert_eq!(insights[0].severity, Severity::Danger);
    assert_eq!(insights[1].severity, Severity::Info);
    assert_eq!(insights[2].severity, Severity::Info);
}

#[test]
fn precipitation_thresholds_are_strict() {
    // Exactly 70 is not danger; exactly 30 is not a rain warning
    let samples = vec![
        sample(8, 0, "25.0", "Rain", Some("0.7")),
        sample(9, 0, "25.0", "Drizzle", Some("0.3")),
    ];

    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast[0].precipitation, 70);
    assert_eq!(forecast[1].precipitation, 30);

    let insights = derive_insights(&forecast);
    assert_eq!(insights[0].severity, Severity::Warning);
    assert_eq!(insights[1].severity, Severity::Info);
}

#[test]
fn heat_and_frost_produce_warnings() {
    let samples = vec![
        sample(8, 12, "42.0", "Sunny", None),
        sample(9, 12, "5.0", "Clear", None),
    ];

    let forecast = aggregate_forecast(&samples);
    let insights = derive_insights(&forecast);

    assert_eq!(insights[0].severity, Severity::Warning);
    assert!(insights[0].message.contains("High temperature (42°C)"));
    assert_eq!(insights[1].severity, Severity::Warning);
    assert!(insights[1].message.contains("Risk of frost damage"));
}

#[test]
fn only_first_three_days_produce_insights() {
    // Day four carries the most severe rain but is past the insight window
    let samples = vec![
        sample(8, 0, "25.0", "Sunny", None),
        sample(9, 0, "25.0", "Sunny", None),
        sample(10, 0, "25.0", "Sunny", None),
        sample(11, 0, "25.0", "Heavy rain", Some("0.95")),
    ];

    let forecast = aggregate_forecast(&samples);
    assert_eq!(forecast.len(), 4);

    let insights = derive_insights(&forecast);
    assert_eq!(insights.len(), 3);
    assert!(insights.iter().all(|i| i.severity == Severity::Info));
}

#[test]
fn insight_messages_capitalize_the_condition() {
    let samples = vec![sample(8, 0, "25.0", "light rain", Some("0.5"))];

    let insights = derive_insights(&aggregate_forecast(&samples));
    assert_eq!(
        insights[0].message,
        "Light rain expected - Moderate conditions, plan accordingly"
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Aggregation never yields more than seven day buckets, and insights
    /// never exceed three, for arbitrary sample sequences.
    #[test]
    fn output_sizes_are_bounded(
        days in prop::collection::vec(1u32..=28, 0..60),
        temps in prop::collection::vec(-10i32..50, 0..60),
    ) {
        let samples: Vec<ForecastSample> = days
            .iter()
            .zip(temps.iter().chain(std::iter::repeat(&25)))
            .map(|(day, temp)| sample(*day, 12, &format!("{}.0", temp), "Sunny", None))
            .collect();

        let forecast = aggregate_forecast(&samples);
        prop_assert!(forecast.len() <= 7);
        prop_assert!(derive_insights(&forecast).len() <= 3);
    }

    /// Per-day min never exceeds max.
    #[test]
    fn min_never_exceeds_max(temps in prop::collection::vec(-20i32..55, 1..40)) {
        let samples: Vec<ForecastSample> = temps
            .iter()
            .map(|t| sample(8, 0, &format!("{}.0", t), "Sunny", None))
            .collect();

        let forecast = aggregate_forecast(&samples);
        prop_assert_eq!(forecast.len(), 1);
        prop_assert!(forecast[0].temp.min <= forecast[0].temp.max);
    }
}
