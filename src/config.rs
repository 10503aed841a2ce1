//! # Unified Application Configuration
//!
//! This module consolidates the extractor and observability settings into a
//! single configuration object loaded from environment variables and
//! validated before use.

use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use crate::pairing::PairingStrategy;
use crate::product_matching::DEFAULT_SCORE_CUTOFF;
use std::env;

/// Extraction pipeline settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Minimum alignment score (0–100) for a catalog entry to be matched
    pub score_cutoff: f64,
    /// How matched products are paired with quantity tokens
    pub pairing: PairingStrategy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            pairing: PairingStrategy::Positional,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a key lookup function
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(cutoff) = lookup("EXTRACTOR_SCORE_CUTOFF") {
            config.score_cutoff = cutoff.trim().parse::<f64>().map_err(|_| {
                AppError::Config("EXTRACTOR_SCORE_CUTOFF must be a valid number".to_string())
            })?;
        }

        if let Some(strategy) = lookup("EXTRACTOR_PAIRING_STRATEGY") {
            config.pairing = strategy
                .parse::<PairingStrategy>()
                .map_err(|e| AppError::Config(format!("EXTRACTOR_PAIRING_STRATEGY: {}", e)))?;
        }

        Ok(config)
    }

    /// Validate extractor configuration
    pub fn validate(&self) -> AppResult<()> {
        if !self.score_cutoff.is_finite() || !(0.0..=100.0).contains(&self.score_cutoff) {
            return Err(AppError::Config(format!(
                "Score cutoff {} must be between 0 and 100",
                self.score_cutoff
            )));
        }
        Ok(())
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub extractor: ExtractorConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            extractor: ExtractorConfig::from_env()?,
            observability: ObservabilityConfig::from_env()?,
        })
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.extractor.validate()?;
        self.observability.validate()?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: score_cutoff={}, pairing={}, log_level={}, log_format={:?}",
            self.extractor.score_cutoff,
            self.extractor.pairing,
            self.observability.log_level,
            self.observability.log_format
        )
    }
}
