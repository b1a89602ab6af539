//! Configuration System
//!
//! Hierarchical configuration loading from:
//! - built-in defaults
//! - `datalog.toml` in the working directory
//! - `DATALOG_`-prefixed environment variables
//!
//! ## Example
//!
//! ```toml
//! # datalog.toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [limits]
//! max_passes = 10000
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! DATALOG_LOGGING__LEVEL=debug
//! DATALOG_LIMITS__MAX_PASSES=10000
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub limits: EvaluationLimits,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Defensive caps on the Fixpoint Driver, disabled by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationLimits {
    /// Maximum passes a single SCC may take before evaluation aborts with
    /// `DatalogError::PassLimitExceeded`. `None` means unbounded — the
    /// formal termination guarantee doesn't need this cap, it only guards
    /// against a bug in the SCC/graph logic looping forever.
    #[serde(default)]
    pub max_passes: Option<usize>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load configuration from default locations: built-in defaults,
    /// `datalog.toml` in the working directory, then `DATALOG_`-prefixed
    /// environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("datalog.toml"))
            .merge(Env::prefixed("DATALOG_").split("__"))
            .extract()
    }

    /// Load configuration from a specific file path, still layering
    /// environment variables on top.
    pub fn from_file(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("DATALOG_").split("__"))
            .extract()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logging: LoggingConfig::default(),
            limits: EvaluationLimits::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for EvaluationLimits {
    fn default() -> Self {
        EvaluationLimits { max_passes: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
        assert_eq!(config.limits.max_passes, None);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[logging]"));
        assert!(toml_str.contains("[limits]"));
    }
}
