//! Provider Verification Module
//!
//! Checks the configured provider and API key against every metro area in
//! the city registry: can we fetch its weather, and does the air pollution
//! endpoint return samples for it?
//!
//! Run this after changing the API key or base URL, before relying on the
//! dashboard.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cities::MetroEntry;
use crate::ingest::openweather::OpenWeatherClient;
use crate::logging;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub base_url: String,
    pub results: Vec<CityVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub working: usize,
    pub partial: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityVerification {
    /// Registry key, e.g. `"London,GB"`.
    pub key: String,
    pub status: VerificationStatus,
    pub weather_ok: bool,
    pub air_quality_ok: bool,
    /// AQI of the current sample, when one came back.
    pub aqi: Option<i64>,
    pub sample_count: usize,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

impl VerificationStatus {
    pub fn from_checks(weather_ok: bool, air_quality_ok: bool) -> Self {
        match (weather_ok, air_quality_ok) {
            (true, true) => VerificationStatus::Success,
            (false, false) => VerificationStatus::Failed,
            _ => VerificationStatus::PartialSuccess,
        }
    }
}

// ============================================================================
// Verification
// ============================================================================

/// Verifies one metro area.
///
/// Air quality is queried at the coordinates the weather endpoint reports.
/// If the weather call fails, the first registered neighbour's coordinates
/// are used instead so the two endpoints are still checked independently.
pub fn verify_city(client: &OpenWeatherClient, entry: &MetroEntry) -> CityVerification {
    let mut result = CityVerification {
        key: entry.key.to_string(),
        status: VerificationStatus::Failed,
        weather_ok: false,
        air_quality_ok: false,
        aqi: None,
        sample_count: 0,
        error_message: None,
    };
    let mut errors = Vec::new();

    let coords = match client.weather_by_city(entry.key) {
        Ok(weather) => {
            result.weather_ok = true;
            Some((weather.coord.lat, weather.coord.lon))
        }
        Err(e) => {
            errors.push(format!("weather: {}", e));
            entry.nearby.first().map(|n| (n.lat, n.lon))
        }
    };

    if let Some((lat, lon)) = coords {
        match client.air_quality(lat, lon) {
            Ok(data) => {
                result.sample_count = data.list.len();
                result.aqi = data.current().map(|s| s.aqi());
                result.air_quality_ok = !data.list.is_empty();
                if data.list.is_empty() {
                    errors.push("air quality: response contained no samples".to_string());
                }
            }
            Err(e) => errors.push(format!("air quality: {}", e)),
        }
    }

    result.status = VerificationStatus::from_checks(result.weather_ok, result.air_quality_ok);
    if !errors.is_empty() {
        result.error_message = Some(errors.join("; "));
    }
    result
}

/// Verifies every entry and logs a one-line summary.
pub fn verify_provider(client: &OpenWeatherClient, entries: &[MetroEntry]) -> VerificationReport {
    let results: Vec<CityVerification> = entries.iter().map(|e| verify_city(client, e)).collect();
    let summary = summarize(&results);

    logging::log_verification_summary(summary.total, summary.working, summary.failed);

    VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        base_url: client.base_url().to_string(),
        results,
        summary,
    }
}

pub fn summarize(results: &[CityVerification]) -> VerificationSummary {
    let count = |status: VerificationStatus| results.iter().filter(|r| r.status == status).count();
    VerificationSummary {
        total: results.len(),
        working: count(VerificationStatus::Success),
        partial: count(VerificationStatus::PartialSuccess),
        failed: count(VerificationStatus::Failed),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::CITY_REGISTRY;
    use std::time::Duration;

    fn result(key: &str, weather_ok: bool, air_quality_ok: bool) -> CityVerification {
        CityVerification {
            key: key.to_string(),
            status: VerificationStatus::from_checks(weather_ok, air_quality_ok),
            weather_ok,
            air_quality_ok,
            aqi: None,
            sample_count: 0,
            error_message: None,
        }
    }

    #[test]
    fn test_status_from_checks() {
        assert_eq!(VerificationStatus::from_checks(true, true), VerificationStatus::Success);
        assert_eq!(VerificationStatus::from_checks(true, false), VerificationStatus::PartialSuccess);
        assert_eq!(VerificationStatus::from_checks(false, true), VerificationStatus::PartialSuccess);
        assert_eq!(VerificationStatus::from_checks(false, false), VerificationStatus::Failed);
    }

    #[test]
    fn test_summarize_counts_each_status() {
        let results = vec![
            result("Delhi,IN", true, true),
            result("London,GB", true, false),
            result("Paris,FR", false, false),
            result("Mumbai,IN", true, true),
        ];
        let summary = summarize(&results);
        assert_eq!(
            summary,
            VerificationSummary { total: 4, working: 2, partial: 1, failed: 1 }
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[]),
            VerificationSummary { total: 0, working: 0, partial: 0, failed: 0 }
        );
    }

    #[test]
    fn test_unreachable_provider_fails_every_city() {
        let client = OpenWeatherClient::with_timeout("http://127.0.0.1:1", Some("KEY"), Duration::from_secs(2))
            .expect("client builds");
        let report = verify_provider(&client, &CITY_REGISTRY[..2]);

        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.failed, 2);
        for r in &report.results {
            let message = r.error_message.as_deref().unwrap_or_default();
            assert!(message.contains("weather:"), "got {:?}", message);
            assert!(message.contains("air quality:"), "fallback coordinates should still be tried");
        }
    }

    #[test]
    fn test_report_serializes() {
        let report = VerificationReport {
            timestamp: "2024-05-01T13:00:00+00:00".to_string(),
            base_url: "https://api.openweathermap.org".to_string(),
            results: vec![result("London,GB", true, true)],
            summary: summarize(&[result("London,GB", true, true)]),
        };
        let json = serde_json::to_string(&report).expect("serializable");
        assert!(json.contains("\"status\":\"Success\""));
        assert!(json.contains("\"working\":1"));
    }
}
