//! # Extraction Error Types Module
//!
//! Error types raised by the order extraction pipeline.

/// Custom error types for extraction operations
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// The catalog has no entries to match against
    EmptyCatalog,
    /// A catalog entry is unusable: blank, duplicated, or a reserved output key
    InvalidCatalogEntry { entry: String, reason: String },
    /// Fewer quantity tokens were found than matched products
    QuantityUndercount { matches: usize, quantities: usize },
    /// The quantity pattern failed to compile
    Pattern(String),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::EmptyCatalog => {
                write!(f, "[CATALOG_EMPTY] Product catalog contains no entries")
            }
            ExtractionError::InvalidCatalogEntry { entry, reason } => write!(
                f,
                "[CATALOG_ENTRY] Catalog entry '{}' {}",
                entry, reason
            ),
            ExtractionError::QuantityUndercount {
                matches,
                quantities,
            } => write!(
                f,
                "[QUANTITY_UNDERCOUNT] {} matched products but only {} quantity tokens found",
                matches, quantities
            ),
            ExtractionError::Pattern(msg) => {
                write!(f, "[PATTERN] Quantity pattern is invalid: {}", msg)
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

impl From<regex::Error> for ExtractionError {
    fn from(err: regex::Error) -> Self {
        ExtractionError::Pattern(err.to_string())
    }
}
