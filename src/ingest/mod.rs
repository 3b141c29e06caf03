//! Provider clients.
//!
//! - `openweather`: current weather, current air pollution, and the
//!   hourly air pollution forecast.

pub mod openweather;

#[cfg(test)]
pub(crate) mod stub_server;
