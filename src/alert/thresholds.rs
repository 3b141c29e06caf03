//! Pollutant threshold classification.
//!
//! Each pollutant has an ascending table of upper bounds; a concentration
//! lands in the first bucket whose bound is strictly greater than it. The
//! last bucket is unbounded, so every input gets a level.

use crate::model::Components;

/// Severity of a single pollutant concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollutantLevel {
    /// 1 (Good) to 5 (Very Poor).
    pub level: u8,
    pub color: &'static str,
    pub status: &'static str,
}

const GOOD: PollutantLevel = PollutantLevel { level: 1, color: "#10b981", status: "Good" };
const FAIR: PollutantLevel = PollutantLevel { level: 2, color: "#f59e0b", status: "Fair" };
const MODERATE: PollutantLevel = PollutantLevel { level: 3, color: "#f97316", status: "Moderate" };
const POOR: PollutantLevel = PollutantLevel { level: 4, color: "#ef4444", status: "Poor" };
const VERY_POOR: PollutantLevel = PollutantLevel { level: 5, color: "#7c2d12", status: "Very Poor" };

type Table = [(f64, PollutantLevel); 5];

const fn table(bounds: [f64; 4]) -> Table {
    [
        (bounds[0], GOOD),
        (bounds[1], FAIR),
        (bounds[2], MODERATE),
        (bounds[3], POOR),
        (f64::INFINITY, VERY_POOR),
    ]
}

static SO2: Table = table([20.0, 80.0, 250.0, 350.0]);
static NO2: Table = table([40.0, 70.0, 150.0, 200.0]);
static PM10: Table = table([20.0, 50.0, 100.0, 200.0]);
static PM2_5: Table = table([10.0, 25.0, 50.0, 75.0]);
static O3: Table = table([60.0, 100.0, 140.0, 180.0]);
static CO: Table = table([4400.0, 9400.0, 12400.0, 15400.0]);

fn table_for(pollutant: &str) -> &'static Table {
    match pollutant.to_ascii_lowercase().as_str() {
        "so2" => &SO2,
        "no2" => &NO2,
        "pm10" => &PM10,
        "pm2_5" => &PM2_5,
        "o3" => &O3,
        "co" => &CO,
        // Unknown pollutants are graded on the PM2.5 scale.
        _ => &PM2_5,
    }
}

/// Classifies a concentration for the named pollutant.
///
/// Never fails: negative values land in the first bucket, and anything that
/// no bound exceeds (including NaN) lands in the last.
pub fn classify(pollutant: &str, value: f64) -> PollutantLevel {
    let rows = table_for(pollutant);
    rows.iter()
        .find(|(max, _)| value < *max)
        .map(|(_, level)| *level)
        .unwrap_or(rows[rows.len() - 1].1)
}

/// Pollutants with a threshold table, in display order.
pub const CLASSIFIED_POLLUTANTS: [&str; 6] = ["pm2_5", "pm10", "o3", "no2", "so2", "co"];

/// Classifies every tabled pollutant of a reading, in `CLASSIFIED_POLLUTANTS` order.
pub fn classify_components(components: &Components) -> Vec<(&'static str, PollutantLevel)> {
    CLASSIFIED_POLLUTANTS
        .iter()
        .filter_map(|&name| components.value(name).map(|value| (name, classify(name, value))))
        .collect()
}

// ---------------------------------------------------------------------------
// AQI display levels
// ---------------------------------------------------------------------------

/// Display information for a provider AQI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiLevel {
    pub level: u8,
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

static AQI_LEVELS: [AqiLevel; 5] = [
    AqiLevel { level: 1, name: "Good", color: "#10b981", description: "Air quality is satisfactory" },
    AqiLevel { level: 2, name: "Fair", color: "#f59e0b", description: "Air quality is acceptable" },
    AqiLevel {
        level: 3,
        name: "Moderate",
        color: "#f97316",
        description: "Sensitive groups may experience issues",
    },
    AqiLevel {
        level: 4,
        name: "Poor",
        color: "#ef4444",
        description: "Everyone may begin to experience issues",
    },
    AqiLevel {
        level: 5,
        name: "Very Poor",
        color: "#7c2d12",
        description: "Health warnings of emergency conditions",
    },
];

/// Looks up display info for an AQI category. Out-of-range categories get
/// the "Good" row.
pub fn aqi_info(aqi: i64) -> &'static AqiLevel {
    match aqi {
        1..=5 => &AQI_LEVELS[(aqi - 1) as usize],
        _ => &AQI_LEVELS[0],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
