//! Running advice derived from the current air-quality sample.
//!
//! `analyze_for_running` and `running_intensity_advice` are pure: same input,
//! same output, no logging. Both treat a missing or empty response as "no
//! data" and return a fixed fallback instead of an error.

use crate::model::{AirQualityData, Components, RiskTier, RunRecommendation};

// ---------------------------------------------------------------------------
// Individual pollutant concern thresholds (µg/m³)
// ---------------------------------------------------------------------------

pub const PM2_5_CONCERN: f64 = 35.0;
pub const PM10_CONCERN: f64 = 100.0;
pub const O3_CONCERN: f64 = 120.0;
pub const NO2_CONCERN: f64 = 150.0;
pub const CO_CONCERN: f64 = 10_000.0;

/// Fallback shown when there is nothing to analyze.
pub const NO_DATA_INTENSITY: &str = "Moderate intensity - monitor how you feel";

/// Per-pollutant checks that run before the AQI dispatch: (exceeded?, concern label, warning).
fn concern_checks(c: &Components) -> [(bool, &'static str, &'static str); 5] {
    [
        (
            c.pm2_5 > PM2_5_CONCERN,
            "PM2.5 levels high",
            "Fine particulates (PM2.5) are elevated - may irritate lungs",
        ),
        (c.pm10 > PM10_CONCERN, "PM10 levels high", "Coarse particles (PM10) are high"),
        (
            c.o3 > O3_CONCERN,
            "Ozone levels high",
            "Ozone concentration is elevated - may cause respiratory issues",
        ),
        (
            c.no2 > NO2_CONCERN,
            "NO₂ levels high",
            "Nitrogen dioxide is elevated - avoid strenuous exercise",
        ),
        (c.co > CO_CONCERN, "CO levels high", "Carbon monoxide is very high - stay indoors"),
    ]
}

fn no_data() -> RunRecommendation {
    RunRecommendation {
        can_run: false,
        recommendation: "Unable to analyze".to_string(),
        description: "No air quality data available".to_string(),
        confidence: 0,
        aqi_risk: RiskTier::Unsafe,
        suggested_time: "N/A".to_string(),
        warnings: vec!["No data available".to_string()],
        pollutants_concern: Vec::new(),
    }
}

/// Decides whether outdoor running is advisable from the first sample of
/// `data`.
///
/// Pollutant concerns are collected first and never change `can_run` on
/// their own; the AQI category drives the decision. Categories outside
/// 1..=5 produce an "Unable to determine" record with confidence 0.
pub fn analyze_for_running(data: Option<&AirQualityData>) -> RunRecommendation {
    let Some(current) = data.and_then(AirQualityData::current) else {
        return no_data();
    };

    let components = &current.components;
    let mut warnings: Vec<String> = Vec::new();
    let mut pollutants_concern: Vec<String> = Vec::new();

    for (exceeded, concern, warning) in concern_checks(components) {
        if exceeded {
            pollutants_concern.push(concern.to_string());
            warnings.push(warning.to_string());
        }
    }

    let (can_run, aqi_risk, recommendation, description, confidence, suggested_time) = match current.aqi() {
        1 => (
            true,
            RiskTier::Safe,
            "✅ Perfect for Running!",
            "Air quality is excellent. This is ideal weather for outdoor running.",
            95,
            "Anytime - Morning is best",
        ),
        2 => {
            if !warnings.iter().any(|w| w.contains("PM2.5")) {
                warnings.push("Consider shorter running distance".to_string());
            }
            (
                true,
                RiskTier::Moderate,
                "✅ Good for Running",
                "Air quality is acceptable. Most people can run comfortably.",
                85,
                "Early morning or evening",
            )
        }
        3 => {
            let can_run = components.pm2_5 < 30.0 && components.o3 < 100.0;
            warnings.push("Sensitive individuals should avoid running".to_string());
            if can_run {
                (
                    true,
                    RiskTier::Risky,
                    "⚠️ Caution While Running",
                    "Air quality is moderate. Reduce running intensity and duration.",
                    70,
                    "Early morning",
                )
            } else {
                (
                    false,
                    RiskTier::Risky,
                    "❌ Not Recommended",
                    "Air quality is poor. Avoid strenuous outdoor exercise.",
                    80,
                    "Stay indoors",
                )
            }
        }
        4 => {
            warnings.push("Air quality is poor - avoid strenuous outdoor activity".to_string());
            warnings.push("Sensitive groups should especially avoid outdoor exercise".to_string());
            (
                false,
                RiskTier::Unsafe,
                "❌ Not Recommended",
                "Air quality is poor. Avoid outdoor running. Prefer indoor exercise.",
                90,
                "Skip outdoor running today",
            )
        }
        5 => {
            warnings.push("HEALTH ALERT: Air quality is hazardous".to_string());
            warnings.push("Stay indoors with proper air filtration".to_string());
            (
                false,
                RiskTier::Unsafe,
                "🚫 DO NOT RUN",
                "Air quality is very poor. Stay indoors and use air purifiers.",
                98,
                "Absolutely avoid outdoor activities",
            )
        }
        _ => (
            false,
            RiskTier::Unsafe,
            "Unable to determine",
            "Could not assess air quality",
            0,
            "N/A",
        ),
    };

    RunRecommendation {
        can_run,
        recommendation: recommendation.to_string(),
        description: description.to_string(),
        confidence,
        aqi_risk,
        suggested_time: suggested_time.to_string(),
        warnings,
        pollutants_concern,
    }
}

/// Suggests how hard to run given the current AQI and PM2.5.
///
/// The clauses are checked in order and the first match wins, so a low PM2.5
/// reading earns the high-intensity message even at AQI 3 or worse.
pub fn running_intensity_advice(data: Option<&AirQualityData>) -> &'static str {
    let Some(current) = data.and_then(AirQualityData::current) else {
        return NO_DATA_INTENSITY;
    };

    let aqi = current.aqi();
    let pm25 = current.components.pm2_5;

    if aqi == 1 || pm25 < 12.0 {
        "High intensity is safe - Push your limits!"
    } else if aqi == 2 || pm25 < 25.0 {
        "Moderate intensity - Maintain steady pace"
    } else if aqi == 3 {
        "Low intensity only - Slow easy run"
    } else {
        "Do not run outdoors"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
