//! Runtime settings read from the environment (and `.env`, loaded by the binary).
//!
//! | Variable                 | Default | Meaning                                        |
//! |--------------------------|---------|------------------------------------------------|
//! | `PANTRY_READY_THRESHOLD` | `0.8`   | Score at which a recipe counts as ready to cook |
//! | `PANTRY_LOG_LEVEL`       | `info`  | Default tracing level when `RUST_LOG` is unset |

use std::env;
use std::error::Error;
use std::fmt;

use crate::match_summary::DEFAULT_READY_THRESHOLD;

pub const READY_THRESHOLD_ENV_VAR: &str = "PANTRY_READY_THRESHOLD";
pub const LOG_LEVEL_ENV_VAR: &str = "PANTRY_LOG_LEVEL";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidNumber { key: String, value: String },
    ThresholdOutOfRange(f64),
    UnknownLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{} must be a number, got '{}'", key, value)
            }
            ConfigError::ThresholdOutOfRange(value) => {
                write!(f, "Ready threshold must be between 0 and 1, got {}", value)
            }
            ConfigError::UnknownLogLevel(level) => write!(
                f,
                "Unknown log level '{}'. Expected one of: {}",
                level,
                LOG_LEVELS.join(", ")
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ready_threshold: f64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ready_threshold: DEFAULT_READY_THRESHOLD,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(READY_THRESHOLD_ENV_VAR) {
            config.ready_threshold =
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: READY_THRESHOLD_ENV_VAR.to_string(),
                        value: raw.clone(),
                    })?;
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV_VAR) {
            config.log_level = level.trim().to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_ready_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        self.ready_threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.ready_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.ready_threshold));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::UnknownLogLevel(self.log_level.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ready_threshold, 0.8);
    }

    #[test]
    fn test_reads_values() {
        let config = Config::from_lookup(lookup_from(&[
            (READY_THRESHOLD_ENV_VAR, " 0.5 "),
            (LOG_LEVEL_ENV_VAR, "DEBUG"),
        ]))
        .unwrap();
        assert_eq!(config.ready_threshold, 0.5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rejects_bad_values() {
        let not_a_number = Config::from_lookup(lookup_from(&[(READY_THRESHOLD_ENV_VAR, "high")]));
        assert!(matches!(not_a_number, Err(ConfigError::InvalidNumber { .. })));

        let out_of_range = Config::from_lookup(lookup_from(&[(READY_THRESHOLD_ENV_VAR, "1.5")]));
        assert_eq!(out_of_range, Err(ConfigError::ThresholdOutOfRange(1.5)));

        let bad_level = Config::from_lookup(lookup_from(&[(LOG_LEVEL_ENV_VAR, "loud")]));
        assert!(matches!(bad_level, Err(ConfigError::UnknownLogLevel(_))));
    }

    #[test]
    fn test_threshold_override_is_validated() {
        assert!(Config::default().with_ready_threshold(0.9).is_ok());
        assert!(Config::default().with_ready_threshold(-0.1).is_err());
    }
}
