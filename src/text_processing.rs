//! # Text Processing Module
//!
//! This module strips matched product names out of a document and detects the
//! quantity tokens left behind.
//!
//! ## Features
//!
//! - Span removal against original char offsets (descending start order,
//!   inclusive end)
//! - Residual text that remembers where each char sat in the source document
//! - Regex-based quantity detection (`<1-6 digits> <unit keyword>`)

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::extraction_errors::ExtractionError;
use crate::product_matching::ProductMatch;

/// Unit keywords recognized after a quantity, in alternation order
///
/// Order matters: the pattern picks the first keyword that matches at a given
/// position, so `"5 liter"` yields `"5 l"` and `"250 ml"` yields `"250 m"`.
pub const UNIT_KEYWORDS: [&str; 10] = [
    "units", "pack", "meter", "kilogram", "l", "liter", "g", "m", "kg", "ml",
];

/// Build the alternation pattern for a list of unit keywords
fn build_quantity_pattern(units: &[&str]) -> String {
    units
        .iter()
        .map(|unit| format!(r"\d{{1,6}} {}", regex::escape(unit)))
        .collect::<Vec<_>>()
        .join("|")
}

lazy_static! {
    static ref DEFAULT_QUANTITY_REGEX: Regex = Regex::new(&build_quantity_pattern(&UNIT_KEYWORDS))
        .expect("Default quantity pattern should be valid");
}

/// Document text with matched product spans removed
///
/// Each remaining char keeps the char offset it had in the original document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualText {
    text: String,
    origins: Vec<usize>,
}

impl ResidualText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Original char offset of the residual char at `index`
    pub fn origin_of(&self, index: usize) -> Option<usize> {
        self.origins.get(index).copied()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for ResidualText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Remove every matched span from `text`
///
/// Spans are removed from the highest start offset down so offsets computed
/// against the original text stay valid. Each removal deletes chars
/// `start..=end`: the char at `end` goes too.
pub fn remove_spans(text: &str, matches: &[ProductMatch]) -> ResidualText {
    let mut chars: Vec<(char, usize)> = text.chars().enumerate().map(|(i, c)| (c, i)).collect();

    let mut ordered: Vec<&ProductMatch> = matches.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    for span in ordered {
        if span.start >= chars.len() {
            trace!(product = %span.product, start = span.start, "Span starts past end of text");
            continue;
        }
        let end = (span.end + 1).min(chars.len());
        if span.start < end {
            chars.drain(span.start..end);
        }
    }

    let (text, origins): (String, Vec<usize>) = chars.into_iter().unzip();
    debug!(
        removed_spans = matches.len(),
        residual_chars = origins.len(),
        "Removed product spans from document"
    );
    ResidualText { text, origins }
}

/// A quantity found in the residual text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityToken {
    /// Literal matched text (e.g. "200 units")
    pub text: String,
    /// Char offset in the residual text
    pub start: usize,
    /// Char offset in the original document
    pub source_start: usize,
}

/// Quantity detector using the unit keyword pattern
#[derive(Debug, Clone)]
pub struct QuantityDetector {
    pattern: Regex,
}

impl QuantityDetector {
    /// Create a detector with the default unit keywords
    ///
    /// ```rust
    /// use order_extractor::text_processing::QuantityDetector;
    ///
    /// let detector = QuantityDetector::new();
    /// assert_eq!(detector.extract_quantities("ship 200 units today"), vec!["200 units"]);
    /// ```
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_QUANTITY_REGEX.clone(),
        }
    }

    /// Create a detector recognizing a custom list of unit keywords
    pub fn with_units(units: &[&str]) -> Result<Self, ExtractionError> {
        if units.is_empty() || units.iter().any(|u| u.trim().is_empty()) {
            return Err(ExtractionError::Pattern(
                "unit keywords must be non-empty".to_string(),
            ));
        }
        let pattern = Regex::new(&build_quantity_pattern(units))?;
        Ok(Self { pattern })
    }

    /// Quantity tokens in left-to-right order, as literal substrings
    pub fn extract_quantities(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Quantity tokens of a residual text with their source positions
    pub fn locate_quantities(&self, residual: &ResidualText) -> Vec<QuantityToken> {
        let text = residual.as_str();
        let mut tokens = Vec::new();
        let mut char_index = 0;
        let mut byte_index = 0;

        for m in self.pattern.find_iter(text) {
            char_index += text[byte_index..m.start()].chars().count();
            byte_index = m.start();

            let source_start = residual.origin_of(char_index).unwrap_or(char_index);
            trace!(token = m.as_str(), source_start, "Found quantity token");
            tokens.push(QuantityToken {
                text: m.as_str().to_string(),
                start: char_index,
                source_start,
            });
        }

        tokens
    }

    pub fn has_quantities(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Get the regex pattern as a string (for testing purposes)
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for QuantityDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(product: &str, start: usize, end: usize) -> ProductMatch {
        ProductMatch {
            product: product.to_string(),
            start,
            end,
            score: 100.0,
        }
    }

    #[test]
    fn test_pattern_has_every_keyword() {
        let pattern = build_quantity_pattern(&UNIT_KEYWORDS);
        assert_eq!(pattern.matches('|').count(), UNIT_KEYWORDS.len() - 1);
        assert!(pattern.starts_with(r"\d{1,6} units|"));
        assert!(pattern.ends_with(r"\d{1,6} ml"));
    }

    #[test]
    fn test_remove_single_span_inclusive_end() {
        let residual = remove_spans("Widget - 5 units", &[span("Widget", 0, 6)]);
        assert_eq!(residual.as_str(), "- 5 units");
        assert_eq!(residual.origin_of(0), Some(7));
    }

    #[test]
    fn test_remove_span_past_end_is_ignored() {
        let residual = remove_spans("abc", &[span("x", 10, 12)]);
        assert_eq!(residual.as_str(), "abc");
    }

    #[test]
    fn test_remove_span_end_clamped() {
        let residual = remove_spans("abcdef", &[span("def", 3, 6)]);
        assert_eq!(residual.as_str(), "abc");
    }

    #[test]
    fn test_locate_quantities_maps_to_source() {
        let text = "Gadget 7 pack, Widget 12 units";
        let residual = remove_spans(text, &[span("Gadget", 0, 6), span("Widget", 15, 21)]);
        assert_eq!(residual.as_str(), "7 pack, 12 units");

        let tokens = QuantityDetector::new().locate_quantities(&residual);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "7 pack");
        assert_eq!(tokens[0].source_start, 7);
        assert_eq!(tokens[1].text, "12 units");
        assert_eq!(tokens[1].start, 8);
        assert_eq!(tokens[1].source_start, 22);
    }

    #[test]
    fn test_with_units_rejects_empty() {
        assert!(QuantityDetector::with_units(&[]).is_err());
        assert!(QuantityDetector::with_units(&["units", " "]).is_err());
    }

    #[test]
    fn test_with_units_escapes_keywords() {
        let detector = QuantityDetector::with_units(&["fl.oz"]).unwrap();
        assert_eq!(detector.extract_quantities("4 fl.oz and 4 flxoz"), vec!["4 fl.oz"]);
    }
}
