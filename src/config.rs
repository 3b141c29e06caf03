//! Runtime configuration.
//!
//! Values come from three places, highest priority first:
//!   1. process environment (after `.env` is loaded by `dotenv`)
//!   2. an optional TOML file passed with `--config`
//!   3. built-in defaults
//!
//! A missing API key is not an error. The service still starts so the
//! offline parts (nearby cities, classification) work; provider requests
//! will fail with a 401 instead.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::{self, DataSource, LogLevel};

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_BASE_URL: &str = "OPENWEATHER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "AQRUN_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const FILE_TIMEOUT_KEY: &str = "provider.timeout_secs";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

/// On-disk TOML layout. Every field is optional.
///
/// ```toml
/// [provider]
/// base_url = "https://api.openweathermap.org"
/// api_key = "..."
/// timeout_secs = 10
///
/// [logging]
/// level = "info"
/// file = "/var/log/aqrun.log"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Provider base URL without a trailing slash.
    pub base_url: String,
    /// `None` when unset or blank.
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: LogLevel::Info,
            log_file: None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Config {
    /// Loads `.env`, the optional TOML file, and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let file = path.map(FileConfig::read).transpose()?;
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merges a parsed file with an environment lookup. Environment wins.
    ///
    /// Takes the lookup as a closure so tests never touch the real
    /// process environment.
    pub fn from_sources<F>(file: Option<FileConfig>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let defaults = Config::default();

        let base_url = non_blank(env(ENV_BASE_URL))
            .or(non_blank(file.provider.base_url))
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        let api_key = non_blank(env(ENV_API_KEY)).or(non_blank(file.provider.api_key));

        let (timeout_key, timeout_secs) = match non_blank(env(ENV_TIMEOUT_SECS)) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
                (ENV_TIMEOUT_SECS, secs)
            }
            None => (
                FILE_TIMEOUT_KEY,
                file.provider.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: timeout_key,
                value: "0".to_string(),
            });
        }

        let log_level = match non_blank(file.logging.level) {
            Some(raw) => raw.parse::<LogLevel>().map_err(|_| ConfigError::InvalidValue {
                key: "logging.level",
                value: raw.clone(),
            })?,
            None => defaults.log_level,
        };

        Ok(Config {
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            log_level,
            log_file: non_blank(file.logging.file),
        })
    }

    /// Logs the startup warning for a missing API key. Call after the
    /// logger is initialized.
    pub fn warn_if_incomplete(&self) {
        if self.api_key.is_none() {
            logging::warn(
                DataSource::Config,
                None,
                &format!("{} is not set. API requests will fail.", ENV_API_KEY),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn parse(toml_text: &str) -> FileConfig {
        toml::from_str(toml_text).expect("test TOML should parse")
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = Config::from_sources(None, env_from(&[])).expect("defaults are valid");
        assert_eq!(config, Config::default());
        assert!(config.api_key.is_none(), "missing key is not an error");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = parse(
            r#"
            [provider]
            base_url = "http://file.example"
            api_key = "from-file"
            timeout_secs = 30
            "#,
        );
        let env = env_from(&[(ENV_API_KEY, "from-env"), (ENV_TIMEOUT_SECS, "5")]);
        let config = Config::from_sources(Some(file), env).expect("valid");

        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.base_url, "http://file.example");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = Config::from_sources(None, env_from(&[(ENV_API_KEY, "   ")])).expect("valid");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let config = Config::from_sources(None, env_from(&[(ENV_BASE_URL, "http://localhost:8080/")]))
            .expect("valid");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = Config::from_sources(None, env_from(&[(ENV_TIMEOUT_SECS, "soon")]))
            .expect_err("non-numeric timeout should fail");
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_TIMEOUT_SECS, .. }));

        let err = Config::from_sources(None, env_from(&[(ENV_TIMEOUT_SECS, "0")]))
            .expect_err("zero timeout should fail");
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_TIMEOUT_SECS, .. }));
    }

    #[test]
    fn test_zero_timeout_names_its_source() {
        let file = parse("[provider]\ntimeout_secs = 0\n");
        let err = Config::from_sources(Some(file), env_from(&[])).expect_err("zero timeout should fail");
        assert!(matches!(err, ConfigError::InvalidValue { key: "provider.timeout_secs", .. }));
        assert!(err.to_string().contains("provider.timeout_secs"), "got {}", err);

        let file = parse("[provider]\ntimeout_secs = 30\n");
        let err = Config::from_sources(Some(file), env_from(&[(ENV_TIMEOUT_SECS, "0")]))
            .expect_err("env zero overrides file");
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS), "got {}", err);
    }

    #[test]
    fn test_logging_section() {
        let file = parse(
            r#"
            [logging]
            level = "debug"
            file = "/tmp/aqrun.log"
            "#,
        );
        let config = Config::from_sources(Some(file), env_from(&[])).expect("valid");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/aqrun.log"));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let file = parse("[logging]\nlevel = \"chatty\"\n");
        let err = Config::from_sources(Some(file), env_from(&[])).expect_err("bad level");
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_read_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(tmp, "[provider]\napi_key = \"disk-key\"").expect("write");
        let file = FileConfig::read(tmp.path()).expect("readable");
        assert_eq!(file.provider.api_key.as_deref(), Some("disk-key"));
    }

    #[test]
    fn test_read_reports_missing_and_malformed_files() {
        let err = FileConfig::read(Path::new("/nonexistent/aqrun.toml")).expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut tmp = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(tmp, "[provider\nbroken").expect("write");
        let err = FileConfig::read(tmp.path()).expect_err("malformed file");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("[provider]\napikey = \"typo\"\n");
        assert!(result.is_err(), "misspelled keys should not be silently ignored");
    }
}
