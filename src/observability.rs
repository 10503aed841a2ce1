//! Observability module for logging, tracing spans and metrics.
//!
//! This module provides:
//! - Structured logging with configurable levels and formats
//! - Tracing span creation utilities for the extraction stages
//! - Metrics recording through the `metrics` facade
//!
//! Log output always goes to stderr; stdout is reserved for the JSON result.

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::prelude::*;

use crate::observability_config::{LogFormat, ObservabilityConfig};

/// Initialize structured logging with tracing and configuration
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("order_extractor={}", config.log_level).parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()?,
    }

    tracing::debug!(
        log_level = %config.log_level,
        log_format = ?config.log_format,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Span wrapping a whole extraction run
pub fn extraction_span(catalog_size: usize, document_chars: usize) -> tracing::Span {
    tracing::info_span!("order_extraction", catalog_size, document_chars)
}

/// Span for a single pipeline stage
pub fn stage_span(stage: &str) -> tracing::Span {
    tracing::debug_span!("extraction_stage", stage = %stage)
}

/// Record metrics for a finished extraction
pub fn record_extraction_metrics(success: bool, duration: Duration, products_matched: usize) {
    metrics::counter!("order_extractions_total", "result" => if success { "success" } else { "failure" })
        .increment(1);
    metrics::histogram!("order_extraction_duration_seconds").record(duration.as_secs_f64());
    metrics::histogram!("order_products_matched").record(products_matched as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_can_be_entered() {
        let span = extraction_span(15, 2000);
        let _guard = span.enter();
        let stage = stage_span("match");
        let _stage_guard = stage.enter();
    }

    #[test]
    fn test_metrics_without_recorder_are_noops() {
        record_extraction_metrics(true, Duration::from_millis(3), 15);
        record_extraction_metrics(false, Duration::from_millis(1), 0);
    }
}
