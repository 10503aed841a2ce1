//! # Product Catalog
//!
//! The ordered list of product names the extractor searches for, plus the
//! built-in catalog and sample purchasing email shipped with the binary.

use std::collections::HashSet;

use crate::extraction_errors::ExtractionError;
use crate::fuzzy;
use crate::pairing::FLAG_KEY;

/// Product names offered by the default manufacturer
pub const DEFAULT_PRODUCTS: [&str; 15] = [
    "Stainless Steel Water Bottle 750mL",
    "Wireless Bluetooth Earbuds Pro",
    "4K Ultra HD Security Camera System",
    "Ergonomic Office Chair (Mesh Back)",
    "Rechargeable LED Camping Lantern",
    "Smart WiFi Programmable Thermostat",
    "Heavy-Duty Wheelbarrow (6 cu ft)",
    "3-Tier Commercial Baking Rack",
    "Industrial Wall-Mounted Tool Cabinet",
    "Hydraulic Floor Jack (3 Ton Capacity)",
    "Stainless Steel Commercial Griddle",
    "Noise-Canceling Over-Ear Headphones",
    "Portable Car Jump Starter 2000A",
    "Commercial-Grade Food Processor",
    "UV Water Purification System",
];

/// Sample purchasing email matching [`DEFAULT_PRODUCTS`]
pub const SAMPLE_ORDER_EMAIL: &str = include_str!("../data/sample_order_email.txt");

/// Ordered, immutable sequence of product names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<String>,
}

impl Catalog {
    /// Build a catalog from product names, keeping their order
    ///
    /// Fails if the list is empty, or if an entry has no alphanumeric
    /// characters, appears twice, or collides with the `flag` output key.
    pub fn new<I, S>(products: I) -> Result<Self, ExtractionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let products: Vec<String> = products.into_iter().map(Into::into).collect();

        if products.is_empty() {
            return Err(ExtractionError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            let reason = if fuzzy::normalize_trimmed(product).is_empty() {
                "has no matchable characters"
            } else if product == FLAG_KEY {
                "collides with the reserved output key"
            } else if !seen.insert(product.as_str()) {
                "appears more than once"
            } else {
                continue;
            };
            return Err(ExtractionError::InvalidCatalogEntry {
                entry: product.clone(),
                reason: reason.to_string(),
            });
        }

        Ok(Self { products })
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(String::as_str)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: DEFAULT_PRODUCTS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.products()[0], "Stainless Steel Water Bottle 750mL");
        assert_eq!(catalog.products()[14], "UV Water Purification System");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::new(Vec::<String>::new());
        assert_eq!(result, Err(ExtractionError::EmptyCatalog));
    }

    #[test]
    fn test_punctuation_only_entry_rejected() {
        let result = Catalog::new(["Widget", "--- ()"]);
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidCatalogEntry { entry, .. }) if entry == "--- ()"
        ));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let result = Catalog::new(["Widget", "Gadget", "Widget"]);
        assert_eq!(
            result,
            Err(ExtractionError::InvalidCatalogEntry {
                entry: "Widget".to_string(),
                reason: "appears more than once".to_string(),
            })
        );
    }

    #[test]
    fn test_flag_entry_rejected() {
        let err = Catalog::new(["Widget", "flag"]).unwrap_err();
        assert!(matches!(
            &err,
            ExtractionError::InvalidCatalogEntry { entry, .. } if entry == "flag"
        ));
        assert!(err.to_string().contains("reserved output key"));
    }

    #[test]
    fn test_similar_but_distinct_entries_accepted() {
        let catalog = Catalog::new(["Widget", "widget", "Flag Pole"]).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_sample_email_mentions_every_product() {
        for product in DEFAULT_PRODUCTS {
            assert!(SAMPLE_ORDER_EMAIL.contains(product), "{}", product);
        }
    }
}
