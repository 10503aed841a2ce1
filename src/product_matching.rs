//! # Product Matching
//!
//! Locates each catalog entry inside a document with fuzzy alignment.

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::fuzzy;

/// Default minimum similarity (0–100) for a catalog entry to count as found
pub const DEFAULT_SCORE_CUTOFF: f64 = 90.0;

/// Where a catalog entry was found in the document
#[derive(Debug, Clone, PartialEq)]
pub struct ProductMatch {
    /// Catalog entry as written in the catalog
    pub product: String,
    /// First char of the aligned span in the original document
    pub start: usize,
    /// One past the last char of the aligned span
    pub end: usize,
    /// Alignment score (0–100)
    pub score: f64,
}

/// Find the best-scoring span for every catalog entry
///
/// Entries whose best alignment scores below `score_cutoff` are skipped.
/// Only one span is kept per entry, even if the product occurs several times.
/// Results follow catalog order, not document order.
pub fn match_products(catalog: &Catalog, text: &str, score_cutoff: f64) -> Vec<ProductMatch> {
    let haystack = fuzzy::normalize(text);
    let mut matches = Vec::with_capacity(catalog.len());

    for product in catalog.iter() {
        let needle = fuzzy::normalize_trimmed(product);
        match fuzzy::align_normalized(&needle, &haystack, score_cutoff) {
            Some(alignment) => {
                debug!(
                    product = %product,
                    score = alignment.score,
                    start = alignment.start,
                    end = alignment.end,
                    "Catalog entry matched"
                );
                matches.push(ProductMatch {
                    product: product.to_string(),
                    start: alignment.start,
                    end: alignment.end,
                    score: alignment.score,
                });
            }
            None => debug!(product = %product, "No span met the score cutoff"),
        }
    }

    info!(
        catalog_size = catalog.len(),
        matched = matches.len(),
        "Product matching completed"
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_in_catalog_order() {
        let catalog = Catalog::new(["Garden Hose", "Widget Pro"]).unwrap();
        let text = "Widget Pro - 3 units\nGarden Hose - 2 units";
        let matches = match_products(&catalog, text, DEFAULT_SCORE_CUTOFF);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].product, "Garden Hose");
        assert_eq!(matches[0].start, 21);
        assert_eq!(matches[1].product, "Widget Pro");
        assert_eq!(matches[1].start, 0);
        assert_eq!(matches[1].end, 10);
    }

    #[test]
    fn test_unmatched_entry_skipped() {
        let catalog = Catalog::new(["Widget Pro", "Hydraulic Floor Jack"]).unwrap();
        let matches = match_products(&catalog, "Widget Pro - 3 units", DEFAULT_SCORE_CUTOFF);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].product, "Widget Pro");
    }

    #[test]
    fn test_case_and_punctuation_tolerated() {
        let catalog = Catalog::new(["Heavy-Duty Wheelbarrow"]).unwrap();
        let matches = match_products(&catalog, "please send HEAVY DUTY wheelbarrow x2", 90.0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, 100.0);
        assert_eq!(matches[0].start, 12);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let catalog = Catalog::new(["Widget"]).unwrap();
        let matches = match_products(&catalog, "Widget 1 pack, Widget 2 pack", 90.0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 0);
    }
}
