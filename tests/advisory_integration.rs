//! Advisory Pipeline Integration Tests
//!
//! Feeds provider-shaped JSON through the public parsers and into the
//! classifier, advisory engine and best-time scanner. No network access.

use aqrun_service::alert::advisory::{analyze_for_running, running_intensity_advice};
use aqrun_service::alert::thresholds::{CLASSIFIED_POLLUTANTS, aqi_info, classify};
use aqrun_service::analysis::forecast::{BEST_TIME_FALLBACK, find_best_time_to_run_in};
use aqrun_service::ingest::openweather::parse_air_quality;
use aqrun_service::model::{AirQualityData, RiskTier};
use chrono::Utc;

/// 2024-05-01T00:00:00Z
const MIDNIGHT: i64 = 1_714_521_600;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn sample_json(dt: i64, aqi: i64, pm2_5: f64, o3: f64) -> String {
    format!(
        r#"{{"dt":{},"main":{{"aqi":{}}},"components":{{"co":230.3,"no":0.1,"no2":9.4,"o3":{},"so2":1.2,"pm2_5":{},"pm10":14.0,"nh3":0.6}}}}"#,
        dt, aqi, o3, pm2_5
    )
}

fn current(aqi: i64, pm2_5: f64, o3: f64) -> AirQualityData {
    let body = format!(
        r#"{{"coord":[2.35,48.85],"list":[{}]}}"#,
        sample_json(MIDNIGHT, aqi, pm2_5, o3)
    );
    parse_air_quality(&body).expect("fixture should parse")
}

fn hourly_forecast(aqis: &[i64]) -> AirQualityData {
    let samples: Vec<String> = aqis
        .iter()
        .enumerate()
        .map(|(i, &aqi)| sample_json(MIDNIGHT + i as i64 * 3600, aqi, 8.0, 40.0))
        .collect();
    let body = format!(r#"{{"coord":{{"lat":48.85,"lon":2.35}},"list":[{}]}}"#, samples.join(","));
    parse_air_quality(&body).expect("forecast fixture should parse")
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn test_classification_is_total_and_monotonic() {
    for pollutant in CLASSIFIED_POLLUTANTS.iter().chain(["nh3", "unknown"].iter()) {
        let mut previous = 0;
        for step in 0..2000 {
            let value = step as f64 * 10.0;
            let level = classify(pollutant, value).level;
            assert!((1..=5).contains(&level), "{} at {} gave level {}", pollutant, value, level);
            assert!(level >= previous, "{} decreased at {}", pollutant, value);
            previous = level;
        }
    }
}

#[test]
fn test_unknown_pollutant_uses_pm2_5_table() {
    assert_eq!(classify("unknown", 5.0), classify("pm2_5", 5.0));
    assert_eq!(classify("unknown", 80.0), classify("pm2_5", 80.0));
}

#[test]
fn test_aqi_info_names() {
    let names: Vec<&str> = (1..=5).map(|aqi| aqi_info(aqi).name).collect();
    assert_eq!(names, ["Good", "Fair", "Moderate", "Poor", "Very Poor"]);
    assert_eq!(aqi_info(0).name, "Good");
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[test]
fn test_missing_and_empty_data_are_unsafe() {
    let empty = parse_air_quality(r#"{"coord":{"lat":0,"lon":0},"list":[]}"#).expect("parses");
    for rec in [analyze_for_running(None), analyze_for_running(Some(&empty))] {
        assert!(!rec.can_run);
        assert_eq!(rec.confidence, 0);
        assert_eq!(rec.aqi_risk, RiskTier::Unsafe);
    }
}

#[test]
fn test_clean_air_is_safe_with_no_concerns() {
    let rec = analyze_for_running(Some(&current(1, 4.0, 30.0)));
    assert!(rec.can_run);
    assert_eq!(rec.aqi_risk, RiskTier::Safe);
    assert_eq!(rec.confidence, 95);
    assert!(rec.pollutants_concern.is_empty());
}

#[test]
fn test_moderate_aqi_with_low_particulates_allows_running() {
    let rec = analyze_for_running(Some(&current(3, 10.0, 50.0)));
    assert!(rec.can_run);
    assert_eq!(rec.aqi_risk, RiskTier::Risky);
    assert_eq!(rec.confidence, 70);
}

#[test]
fn test_moderate_aqi_with_high_pm2_5_blocks_running() {
    let rec = analyze_for_running(Some(&current(3, 40.0, 50.0)));
    assert!(!rec.can_run);
    assert_eq!(rec.aqi_risk, RiskTier::Risky);
    assert_eq!(rec.confidence, 80);
    assert!(rec.pollutants_concern.iter().any(|c| c == "PM2.5 levels high"));
}

#[test]
fn test_recommendation_json_shape() {
    let rec = analyze_for_running(Some(&current(2, 10.0, 50.0)));
    let json = serde_json::to_value(&rec).expect("serializable");
    assert_eq!(json["canRun"], true);
    assert_eq!(json["aqiRisk"], "moderate");
    assert!(json["pollutantsConcern"].is_array());
}

// ---------------------------------------------------------------------------
// Best time and intensity
// ---------------------------------------------------------------------------

#[test]
fn test_best_time_picks_first_minimum() {
    let mut aqis = vec![3, 3, 1, 4];
    aqis.extend(std::iter::repeat_n(2, 16));
    aqis.push(1);
    aqis.extend(std::iter::repeat_n(3, 3));
    assert_eq!(aqis.len(), 24);

    let best = find_best_time_to_run_in(Some(&hourly_forecast(&aqis)), &Utc);
    assert_eq!(best, "02:00 AM (AQI: 1)");
}

#[test]
fn test_best_time_falls_back_below_sample_floor() {
    let forecast = hourly_forecast(&[1, 1, 1, 1, 1]);
    assert_eq!(find_best_time_to_run_in(Some(&forecast), &Utc), BEST_TIME_FALLBACK);
    assert_eq!(find_best_time_to_run_in(None, &Utc), BEST_TIME_FALLBACK);
}

#[test]
fn test_intensity_low_pm2_5_wins_at_moderate_aqi() {
    let advice = running_intensity_advice(Some(&current(3, 5.0, 50.0)));
    assert_eq!(advice, "High intensity is safe - Push your limits!");
    assert_ne!(advice, "Low intensity only - Slow easy run");
}
