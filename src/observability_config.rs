//! # Observability Configuration
//!
//! Log level and output format for the tracing subscriber.

use std::env;

use crate::errors::{AppError, AppResult};

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line human readable output
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT '{}' is invalid (expected pretty, json or compact)",
                other
            ))),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityConfig {
    /// Log level for the order_extractor crate
    pub log_level: String,
    /// Output format of log events
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a key lookup function
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: match lookup("LOG_FORMAT") {
                Some(format) => format.parse()?,
                None => defaults.log_format,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> AppResult<()> {
        const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "LOG_LEVEL '{}' is invalid (expected one of {})",
                self.log_level,
                LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}
