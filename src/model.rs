//! Core data types for the air-quality running advisor.
//!
//! This module defines the shared domain model imported by all other modules.
//! The provider response shapes mirror the OpenWeather JSON so they can be
//! deserialized directly; everything derived from them (recommendations,
//! risk tiers) lives here too so the alert and analysis modules share one
//! vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Air pollution types
// ---------------------------------------------------------------------------

/// Pollutant concentrations for one sample, in µg/m³.
///
/// Corresponds to the `components` object of an OpenWeather air pollution
/// response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

impl Components {
    /// Looks up a concentration by provider field name (`"pm2_5"`, `"o3"`, ...).
    pub fn value(&self, pollutant: &str) -> Option<f64> {
        match pollutant {
            "co" => Some(self.co),
            "no" => Some(self.no),
            "no2" => Some(self.no2),
            "o3" => Some(self.o3),
            "so2" => Some(self.so2),
            "pm2_5" => Some(self.pm2_5),
            "pm10" => Some(self.pm10),
            "nh3" => Some(self.nh3),
            _ => None,
        }
    }
}

/// The `main` object of an air pollution sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiMain {
    /// Provider AQI category, 1 (Good) to 5 (Very Poor).
    pub aqi: i64,
}

/// A single timestamped air-quality reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    /// Seconds since the Unix epoch.
    pub dt: i64,
    pub main: AqiMain,
    pub components: Components,
}

impl AirQualitySample {
    pub fn aqi(&self) -> i64 {
        self.main.aqi
    }
}

/// Air pollution response: the current reading (one sample) or an hourly
/// forecast (many samples), in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityData {
    #[serde(default)]
    pub coord: Coord,
    #[serde(default)]
    pub list: Vec<AirQualitySample>,
}

impl AirQualityData {
    /// The first sample, treated as "now" by the advisory functions.
    pub fn current(&self) -> Option<&AirQualitySample> {
        self.list.first()
    }
}

/// Coordinates as the provider reports them.
///
/// The weather endpoint sends `{"lat": .., "lon": ..}`. Air pollution
/// responses have been seen both in that shape and as a `[lon, lat]` pair,
/// so both are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CoordRepr")]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CoordRepr {
    Object { lat: f64, lon: f64 },
    Pair([f64; 2]),
}

impl From<CoordRepr> for Coord {
    fn from(repr: CoordRepr) -> Self {
        match repr {
            CoordRepr::Object { lat, lon } => Coord { lat, lon },
            CoordRepr::Pair([lon, lat]) => Coord { lat, lon },
        }
    }
}

// ---------------------------------------------------------------------------
// Weather types
// ---------------------------------------------------------------------------

/// Current weather for a location, metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub name: String,
    pub sys: WeatherSys,
    pub coord: Coord,
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub wind: Wind,
    /// Visibility in metres. Missing in some responses.
    #[serde(default)]
    pub visibility: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSys {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

// ---------------------------------------------------------------------------
// Recommendation types
// ---------------------------------------------------------------------------

/// Coarse running-suitability bucket, in ascending order of risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Safe,
    Moderate,
    Risky,
    Unsafe,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Safe => write!(f, "safe"),
            RiskTier::Moderate => write!(f, "moderate"),
            RiskTier::Risky => write!(f, "risky"),
            RiskTier::Unsafe => write!(f, "unsafe"),
        }
    }
}

/// Outcome of `alert::advisory::analyze_for_running`.
///
/// Recomputed on every query; nothing holds on to one between calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecommendation {
    pub can_run: bool,
    pub recommendation: String,
    pub description: String,
    /// 0-100.
    pub confidence: u8,
    pub aqi_risk: RiskTier,
    pub suggested_time: String,
    pub warnings: Vec<String>,
    pub pollutants_concern: Vec<String>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or decoding provider data.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// Non-2xx HTTP response from the provider.
    #[error("{endpoint} API error: {status}")]
    Http { endpoint: &'static str, status: u16 },
    /// The base URL and parameters do not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body could not be deserialized.
    #[error("Parse error: {0}")]
    Parse(String),
    /// The response decoded but held nothing usable.
    #[error("No data available: {0}")]
    NotFound(String),
}

impl ProviderError {
    /// The HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
