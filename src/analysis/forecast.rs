//! Forecast scanning and timestamp formatting.
//!
//! # Timezone injection
//! Every formatter has an `_in` variant that takes the timezone explicitly.
//! The plain variants use `chrono::Local`; tests use the `_in` forms with
//! `Utc` so output does not depend on the machine running them.

use chrono::{DateTime, Local, TimeZone};

use crate::model::AirQualityData;

/// Returned when the forecast is too short to be worth scanning.
pub const BEST_TIME_FALLBACK: &str = "Early morning (6-8 AM)";

/// Forecasts shorter than this are not scanned.
pub const MIN_FORECAST_SAMPLES: usize = 8;

/// Only this many leading samples (hours) are considered.
pub const LOOKAHEAD_SAMPLES: usize = 24;

fn to_local<Tz: TimeZone>(unix_secs: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(unix_secs, 0).map(|utc| utc.with_timezone(tz))
}

// ---------------------------------------------------------------------------
// Best time to run
// ---------------------------------------------------------------------------

/// Finds the lowest-AQI hour in the next day of forecast samples and formats
/// it as `"<hh:mm AM/PM> (AQI: <n>)"`.
///
/// Ties keep the earliest hour.
pub fn find_best_time_to_run_in<Tz>(data: Option<&AirQualityData>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let list = match data {
        Some(d) if d.list.len() >= MIN_FORECAST_SAMPLES => &d.list,
        _ => return BEST_TIME_FALLBACK.to_string(),
    };

    let window = &list[..list.len().min(LOOKAHEAD_SAMPLES)];
    let mut best = &window[0];
    for sample in &window[1..] {
        if sample.aqi() < best.aqi() {
            best = sample;
        }
    }

    let time = to_local(best.dt, tz)
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!("{} (AQI: {})", time, best.aqi())
}

/// `find_best_time_to_run_in` using the machine's local timezone.
pub fn find_best_time_to_run(data: Option<&AirQualityData>) -> String {
    find_best_time_to_run_in(data, &Local)
}

// ---------------------------------------------------------------------------
// Timestamp formatting
// ---------------------------------------------------------------------------

/// Formats a Unix timestamp as e.g. `"May 1, 01:00 PM"`.
pub fn format_time_in<Tz>(unix_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    to_local(unix_secs, tz)
        .map(|t| t.format("%b %-d, %I:%M %p").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Formats a Unix timestamp as e.g. `"Wed, May 1"`.
pub fn format_date_in<Tz>(unix_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    to_local(unix_secs, tz)
        .map(|t| t.format("%a, %b %-d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn format_time(unix_secs: i64) -> String {
    format_time_in(unix_secs, &Local)
}

pub fn format_date(unix_secs: i64) -> String {
    format_date_in(unix_secs, &Local)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
