//! # Order Extractor
//!
//! Extracts product → quantity pairs from free-text purchase emails by
//! fuzzy-matching a product catalog against the email body and pairing each
//! matched product with a nearby quantity token.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod extraction_errors;
pub mod extractor;
pub mod fuzzy;
pub mod observability;
pub mod observability_config;
pub mod pairing;
pub mod product_matching;
pub mod text_processing;

// Re-export types for easier access
pub use catalog::Catalog;
pub use extractor::{run, OrderExtractor};
pub use pairing::{PairingStrategy, ResultMapping};
pub use product_matching::ProductMatch;
pub use text_processing::{QuantityDetector, QuantityToken};
