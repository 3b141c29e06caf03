//! Structured logging for the air-quality running advisor.
//!
//! Thin layer over `tracing`: every event carries the data source it came
//! from and, where it applies, the location being queried (city name or
//! coordinates). Output goes to stderr, or to an append-only file for
//! scheduled runs.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use crate::model::ProviderError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Weather,
    AirQuality,
    Forecast,
    Config,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Weather => write!(f, "WX"),
            DataSource::AirQuality => write!(f, "AQ"),
            DataSource::Forecast => write!(f, "AQF"),
            DataSource::Config => write!(f, "CFG"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Caller-side problem: bad API key or a city the provider does not know.
    Expected,
    /// Provider outage, network trouble, or a response we cannot decode.
    Unexpected,
    /// Cannot tell from the error alone.
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

/// Installs the global subscriber.
///
/// With `log_file` set, events are appended to that file without ANSI
/// colours; otherwise they go to stderr. Returns `Ok(false)` when a
/// subscriber was already installed; that one stays in place and the
/// refusal is logged through it at debug level.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) -> std::io::Result<bool> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(min_level))
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None if console_timestamps => builder.with_writer(std::io::stderr).try_init(),
        None => builder.without_time().with_writer(std::io::stderr).try_init(),
    };

    match installed {
        Ok(()) => Ok(true),
        Err(e) => {
            debug(DataSource::System, None, &format!("logger already initialized: {}", e));
            Ok(false)
        }
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

const NO_LOCATION: &str = "-";

/// Log a general informational message
pub fn info(source: DataSource, location: Option<&str>, message: &str) {
    tracing::info!(source = %source, location = location.unwrap_or(NO_LOCATION), "{}", message);
}

/// Log a warning message
pub fn warn(source: DataSource, location: Option<&str>, message: &str) {
    tracing::warn!(source = %source, location = location.unwrap_or(NO_LOCATION), "{}", message);
}

/// Log an error message
pub fn error(source: DataSource, location: Option<&str>, message: &str) {
    tracing::error!(source = %source, location = location.unwrap_or(NO_LOCATION), "{}", message);
}

/// Log a debug message
pub fn debug(source: DataSource, location: Option<&str>, message: &str) {
    tracing::debug!(source = %source, location = location.unwrap_or(NO_LOCATION), "{}", message);
}

// ---------------------------------------------------------------------------
// Provider Failure Logging
// ---------------------------------------------------------------------------

/// Decides how alarming a provider error is.
pub fn classify_provider_failure(err: &ProviderError) -> FailureType {
    match err {
        // 401: missing/invalid key. 404: unknown city.
        ProviderError::Http { status: 401 | 404, .. } => FailureType::Expected,
        ProviderError::Http { status, .. } if *status >= 500 => FailureType::Unexpected,
        ProviderError::Http { .. } => FailureType::Unknown,
        ProviderError::InvalidUrl(_) | ProviderError::Transport(_) | ProviderError::Parse(_) => {
            FailureType::Unexpected
        }
        ProviderError::NotFound(_) => FailureType::Unknown,
    }
}

/// Log a provider failure at a level matching its classification.
pub fn log_provider_failure(source: DataSource, location: &str, operation: &str, err: &ProviderError) {
    let failure_type = classify_provider_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(source, Some(location), &message),
        FailureType::Unexpected => error(source, Some(location), &message),
        FailureType::Unknown => warn(source, Some(location), &message),
    }
}

// ---------------------------------------------------------------------------
// Verification Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a provider verification run
pub fn log_verification_summary(total: usize, successful: usize, failed: usize) {
    let message = format!(
        "Verification complete: {}/{} successful, {} failed",
        successful, total, failed
    );

    if failed == 0 {
        info(DataSource::System, None, &message);
    } else if successful == 0 {
        error(DataSource::System, None, &message);
    } else {
        warn(DataSource::System, None, &message);
    }
}
