//! Forecast analysis for the running advisor.
//!
//! Submodules:
//! - `forecast`: best-time-to-run scan over hourly samples, plus the
//!   timestamp formatters the report uses.

pub mod forecast;
