//! Dashboard assembly: one fetch of weather, current air quality and the
//! forecast, run through the advisory functions, rendered as plain text.
//!
//! Fetching and rendering are split so the rendering can be tested against
//! fixtures without a network.

use std::fmt::Write as _;

use chrono::TimeZone;
use serde::Serialize;

use crate::alert::advisory::{analyze_for_running, running_intensity_advice};
use crate::alert::thresholds::{aqi_info, classify_components};
use crate::analysis::forecast::{find_best_time_to_run_in, format_time_in};
use crate::cities::{NearbyCity, random_nearby_cities};
use crate::ingest::openweather::OpenWeatherClient;
use crate::logging::{self, DataSource};
use crate::model::{AirQualityData, ProviderError, RunRecommendation, WeatherData};

/// What to look up.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coords { lat: f64, lon: f64 },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => write!(f, "{}", name),
            Location::Coords { lat, lon } => write!(f, "{},{}", lat, lon),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub weather: WeatherData,
    pub air_quality: AirQualityData,
    pub forecast: AirQualityData,
    pub recommendation: RunRecommendation,
    pub best_time: String,
    pub intensity: String,
    pub nearby: Vec<NearbyCity>,
}

impl Dashboard {
    /// Derives the advice from already-fetched data, formatting the best
    /// time in `tz`.
    pub fn from_parts<Tz>(
        weather: WeatherData,
        air_quality: AirQualityData,
        forecast: AirQualityData,
        nearby: Vec<NearbyCity>,
        tz: &Tz,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let recommendation = analyze_for_running(Some(&air_quality));
        let intensity = running_intensity_advice(Some(&air_quality)).to_string();
        let best_time = find_best_time_to_run_in(Some(&forecast), tz);
        Self {
            weather,
            air_quality,
            forecast,
            recommendation,
            best_time,
            intensity,
            nearby,
        }
    }
}

/// Picks neighbours for the dashboard. A user-supplied city name is used as
/// given; coordinate lookups use the name the provider resolved. A blank
/// name gets no neighbours, since it would match every registry key.
fn nearby_for(location: &Location, resolved_name: &str, count: usize) -> Vec<NearbyCity> {
    let query = match location {
        Location::City(name) => name.as_str(),
        Location::Coords { .. } => resolved_name,
    };
    if query.trim().is_empty() {
        return Vec::new();
    }
    random_nearby_cities(query, count)
}

/// Fetches everything for `location`. Any failed request fails the whole
/// dashboard; there is no partial result.
pub fn build_dashboard(
    client: &OpenWeatherClient,
    location: &Location,
    nearby_count: usize,
) -> Result<Dashboard, ProviderError> {
    let weather = match location {
        Location::City(name) => client.weather_by_city(name)?,
        Location::Coords { lat, lon } => client.weather_by_coords(*lat, *lon)?,
    };
    let (lat, lon) = (weather.coord.lat, weather.coord.lon);

    let air_quality = client.air_quality(lat, lon)?;
    if air_quality.list.is_empty() {
        return Err(ProviderError::NotFound(format!("no air quality samples for {}", location)));
    }
    let forecast = client.air_quality_forecast(lat, lon)?;

    let nearby = nearby_for(location, &weather.name, nearby_count);
    logging::info(
        DataSource::System,
        Some(&location.to_string()),
        &format!(
            "AQI {} with {} forecast samples, {} nearby cities",
            air_quality.list[0].aqi(),
            forecast.list.len(),
            nearby.len()
        ),
    );

    Ok(Dashboard::from_parts(weather, air_quality, forecast, nearby, &chrono::Local))
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

fn pollutant_label(name: &str) -> &'static str {
    match name {
        "pm2_5" => "PM2.5",
        "pm10" => "PM10",
        "o3" => "O₃",
        "no2" => "NO₂",
        "so2" => "SO₂",
        _ => "CO",
    }
}

/// Renders the dashboard as plain text. Sample times are shown in `tz`.
pub fn render<Tz>(dashboard: &Dashboard, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let w = &dashboard.weather;
    let rec = &dashboard.recommendation;

    let place = if w.sys.country.is_empty() {
        w.name.clone()
    } else {
        format!("{}, {}", w.name, w.sys.country)
    };
    let sky = w.weather.first().map(|c| c.description.as_str()).unwrap_or("n/a");

    let _ = writeln!(out, "{}", place);
    let _ = writeln!(
        out,
        "  {:.1}°C (feels like {:.1}°C), {}",
        w.main.temp, w.main.feels_like, sky
    );
    let _ = writeln!(
        out,
        "  Humidity {:.0}%  Pressure {:.0} hPa  Wind {:.1} m/s",
        w.main.humidity, w.main.pressure, w.wind.speed
    );

    if let Some(current) = dashboard.air_quality.current() {
        let info = aqi_info(current.aqi());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Air quality at {}: AQI {} ({}) - {}",
            format_time_in(current.dt, tz),
            current.aqi(),
            info.name,
            info.description
        );
        for (name, level) in classify_components(&current.components) {
            let value = current.components.value(name).unwrap_or(f64::NAN);
            let _ = writeln!(out, "  {:<6} {:>9.2}  {}", pollutant_label(name), value, level.status);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Running: {}", rec.recommendation);
    let _ = writeln!(out, "  {}", rec.description);
    let _ = writeln!(out, "  Risk: {}  Confidence: {}%", rec.aqi_risk, rec.confidence);
    let _ = writeln!(out, "  Suggested time: {}", rec.suggested_time);
    let _ = writeln!(out, "  Best time (next 24h): {}", dashboard.best_time);
    let _ = writeln!(out, "  Intensity: {}", dashboard.intensity);
    if !rec.warnings.is_empty() {
        let _ = writeln!(out, "  Warnings:");
        for warning in &rec.warnings {
            let _ = writeln!(out, "    - {}", warning);
        }
    }
    if !rec.pollutants_concern.is_empty() {
        let _ = writeln!(out, "  Pollutants of concern: {}", rec.pollutants_concern.join(", "));
    }

    if !dashboard.nearby.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Nearby");
        for city in &dashboard.nearby {
            let _ = writeln!(out, "  {}, {} ({} km)", city.name, city.country, city.distance_km);
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
