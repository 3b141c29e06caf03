//! OpenWeather API Client
//!
//! Retrieves current weather, current air pollution, and the hourly air
//! pollution forecast from an OpenWeather-compatible provider.
//!
//! API Documentation: https://openweathermap.org/current
//! Air pollution: https://openweathermap.org/api/air-pollution
//!
//! Every call is a single blocking GET with no retry. Any non-2xx status is
//! returned as `ProviderError::Http` and the body is discarded.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::logging::{self, DataSource};
use crate::model::{AirQualityData, ProviderError, WeatherData};

pub const WEATHER_PATH: &str = "/data/2.5/weather";
pub const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";
pub const AIR_POLLUTION_FORECAST_PATH: &str = "/data/2.5/air_pollution/forecast";

// Endpoint labels used in error messages, e.g. "Weather API error: 401".
const WEATHER: &str = "Weather";
const AIR_QUALITY: &str = "Air Quality";
const AIR_QUALITY_FORECAST: &str = "Air Quality Forecast";

// ============================================================================
// URL Construction
// ============================================================================

fn build_url(base_url: &str, path: &str, params: &[(&str, String)]) -> Result<String, ProviderError> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse_with_params(&raw, params)
        .map(String::from)
        .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// `GET /data/2.5/weather?q=<city>&appid=<key>&units=metric`
pub fn weather_by_city_url(base_url: &str, api_key: &str, city: &str) -> Result<String, ProviderError> {
    build_url(
        base_url,
        WEATHER_PATH,
        &[
            ("q", city.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ],
    )
}

/// `GET /data/2.5/weather?lat=<lat>&lon=<lon>&appid=<key>&units=metric`
pub fn weather_by_coords_url(base_url: &str, api_key: &str, lat: f64, lon: f64) -> Result<String, ProviderError> {
    build_url(
        base_url,
        WEATHER_PATH,
        &[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ],
    )
}

/// `GET /data/2.5/air_pollution?lat=<lat>&lon=<lon>&appid=<key>`
pub fn air_quality_url(base_url: &str, api_key: &str, lat: f64, lon: f64) -> Result<String, ProviderError> {
    build_url(
        base_url,
        AIR_POLLUTION_PATH,
        &[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", api_key.to_string()),
        ],
    )
}

/// `GET /data/2.5/air_pollution/forecast?lat=<lat>&lon=<lon>&appid=<key>`
pub fn air_quality_forecast_url(base_url: &str, api_key: &str, lat: f64, lon: f64) -> Result<String, ProviderError> {
    build_url(
        base_url,
        AIR_POLLUTION_FORECAST_PATH,
        &[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", api_key.to_string()),
        ],
    )
}

// ============================================================================
// Response Parsing
// ============================================================================

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))
}

/// Decode a `/data/2.5/weather` response body.
pub fn parse_weather(body: &str) -> Result<WeatherData, ProviderError> {
    parse_json(body)
}

/// Decode an `/data/2.5/air_pollution` or `/air_pollution/forecast` body.
pub fn parse_air_quality(body: &str) -> Result<AirQualityData, ProviderError> {
    parse_json(body)
}

// ============================================================================
// API Client
// ============================================================================

/// Blocking client bound to one provider and API key.
pub struct OpenWeatherClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        Self::with_timeout(&config.base_url, config.api_key.as_deref(), config.timeout)
    }

    /// An absent key is sent as an empty `appid`; the provider answers 401.
    pub fn with_timeout(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.unwrap_or_default().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current weather by city name, e.g. `"London"` or `"London,GB"`.
    pub fn weather_by_city(&self, city: &str) -> Result<WeatherData, ProviderError> {
        let url = weather_by_city_url(&self.base_url, &self.api_key, city)?;
        let body = self.get(DataSource::Weather, city, WEATHER, &url)?;
        self.decode(DataSource::Weather, city, "weather_by_city", parse_weather(&body))
    }

    /// Current weather by coordinates.
    pub fn weather_by_coords(&self, lat: f64, lon: f64) -> Result<WeatherData, ProviderError> {
        let location = format!("{},{}", lat, lon);
        let url = weather_by_coords_url(&self.base_url, &self.api_key, lat, lon)?;
        let body = self.get(DataSource::Weather, &location, WEATHER, &url)?;
        self.decode(DataSource::Weather, &location, "weather_by_coords", parse_weather(&body))
    }

    /// Current air pollution (a one-sample list).
    pub fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQualityData, ProviderError> {
        let location = format!("{},{}", lat, lon);
        let url = air_quality_url(&self.base_url, &self.api_key, lat, lon)?;
        let body = self.get(DataSource::AirQuality, &location, AIR_QUALITY, &url)?;
        self.decode(DataSource::AirQuality, &location, "air_quality", parse_air_quality(&body))
    }

    /// Hourly air pollution forecast, chronological.
    pub fn air_quality_forecast(&self, lat: f64, lon: f64) -> Result<AirQualityData, ProviderError> {
        let location = format!("{},{}", lat, lon);
        let url = air_quality_forecast_url(&self.base_url, &self.api_key, lat, lon)?;
        let body = self.get(DataSource::Forecast, &location, AIR_QUALITY_FORECAST, &url)?;
        self.decode(DataSource::Forecast, &location, "air_quality_forecast", parse_air_quality(&body))
    }

    fn get(&self, source: DataSource, location: &str, endpoint: &'static str, url: &str) -> Result<String, ProviderError> {
        // The URL carries the API key, so only the endpoint is logged.
        logging::debug(source, Some(location), &format!("GET {}", endpoint));

        let result = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))
            .and_then(|response| {
                let status = response.status();
                if !status.is_success() {
                    return Err(ProviderError::Http { endpoint, status: status.as_u16() });
                }
                response
                    .text()
                    .map_err(|e| ProviderError::Transport(e.without_url().to_string()))
            });

        if let Err(e) = &result {
            logging::log_provider_failure(source, location, endpoint, e);
        }
        result
    }

    fn decode<T>(
        &self,
        source: DataSource,
        location: &str,
        operation: &str,
        parsed: Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        if let Err(e) = &parsed {
            logging::log_provider_failure(source, location, operation, e);
        }
        parsed
    }
}

// ============================================================================
// Tests
// ============================================================================
