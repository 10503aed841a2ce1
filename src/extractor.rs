//! # Order Extractor
//!
//! Runs the full pipeline over one document:
//!
//! 1. match every catalog entry against the document
//! 2. remove the matched spans
//! 3. detect quantity tokens in what is left
//! 4. pair products with quantities
//!
//! The extractor holds no mutable state, so one instance can serve any number
//! of documents, from any number of threads.

use std::time::Instant;

use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::ExtractorConfig;
use crate::errors::error_logging;
use crate::extraction_errors::ExtractionError;
use crate::observability;
use crate::pairing::{self, ResultMapping};
use crate::product_matching::{self, ProductMatch};
use crate::text_processing::{self, QuantityDetector, QuantityToken, ResidualText};

/// Intermediate results of one extraction, for inspection and debugging
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub matches: Vec<ProductMatch>,
    pub residual: ResidualText,
    pub quantities: Vec<QuantityToken>,
    pub result: ResultMapping,
}

/// Catalog-driven order extractor
#[derive(Debug, Clone)]
pub struct OrderExtractor {
    catalog: Catalog,
    config: ExtractorConfig,
    detector: QuantityDetector,
}

impl OrderExtractor {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, ExtractorConfig::default())
    }

    pub fn with_config(catalog: Catalog, config: ExtractorConfig) -> Self {
        Self {
            catalog,
            config,
            detector: QuantityDetector::new(),
        }
    }

    /// Swap in a custom quantity detector
    pub fn with_detector(mut self, detector: QuantityDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Locate catalog entries in `text`
    pub fn match_products(&self, text: &str) -> Vec<ProductMatch> {
        let _span = observability::stage_span("match").entered();
        product_matching::match_products(&self.catalog, text, self.config.score_cutoff)
    }

    /// Extract the product → quantity mapping from `text`
    pub fn run(&self, text: &str) -> Result<ResultMapping, ExtractionError> {
        self.run_with_report(text).map(|report| report.result)
    }

    /// Like [`OrderExtractor::run`], also returning the intermediate stages
    pub fn run_with_report(&self, text: &str) -> Result<ExtractionReport, ExtractionError> {
        let document_chars = text.chars().count();
        let span = observability::extraction_span(self.catalog.len(), document_chars);
        let _guard = span.enter();
        let started = Instant::now();

        let matches = self.match_products(text);

        let residual = {
            let _span = observability::stage_span("remove_spans").entered();
            text_processing::remove_spans(text, &matches)
        };

        let quantities = {
            let _span = observability::stage_span("extract_quantities").entered();
            self.detector.locate_quantities(&residual)
        };

        if quantities.len() != matches.len() {
            warn!(
                matches = matches.len(),
                quantities = quantities.len(),
                pairing = %self.config.pairing,
                "Matched product and quantity counts differ"
            );
        }

        let paired = {
            let _span = observability::stage_span("pair").entered();
            pairing::pair(&matches, &quantities, self.config.pairing)
        };

        observability::record_extraction_metrics(paired.is_ok(), started.elapsed(), matches.len());

        let result = paired.inspect_err(|e| {
            error_logging::log_extraction_error(e, "pair", self.catalog.len(), document_chars);
        })?;

        info!(
            products = result.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Order extraction completed"
        );

        Ok(ExtractionReport {
            matches,
            residual,
            quantities,
            result,
        })
    }
}

impl Default for OrderExtractor {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

/// Extract a product → quantity mapping with default settings
pub fn run(catalog: &Catalog, text: &str) -> Result<ResultMapping, ExtractionError> {
    OrderExtractor::new(catalog.clone()).run(text)
}
