//! Air-quality classification and running advice.
//!
//! - `thresholds`: per-pollutant severity tables and AQI display levels.
//! - `advisory`: the AQI-driven run recommendation and intensity advice.

pub mod advisory;
pub mod thresholds;
