//! # Extraction Tests
//!
//! End-to-end tests of the order extraction pipeline.


use order_extractor::catalog::{Catalog, SAMPLE_ORDER_EMAIL};
use order_extractor::config::ExtractorConfig;
use order_extractor::extraction_errors::ExtractionError;
use order_extractor::pairing::PairingStrategy;
use order_extractor::{run, OrderExtractor};
use test_helpers::{catalog, order_email, sample_pairs};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_email_extracts_every_product() {
        let result = run(&Catalog::default(), SAMPLE_ORDER_EMAIL).unwrap();

        assert_eq!(result.len(), 15);
        for (product, quantity) in sample_pairs() {
            assert_eq!(result.get(product), Some(quantity), "{}", product);
        }
        assert_eq!(
            result.get("Stainless Steel Water Bottle 750mL"),
            Some("200 units")
        );
        assert_eq!(result.get("Commercial-Grade Food Processor"), Some("35 units"));
        assert_eq!(result.flag(), 0);
    }

    #[test]
    fn test_sample_email_json_shape() {
        let json = run(&Catalog::default(), SAMPLE_ORDER_EMAIL)
            .unwrap()
            .to_json()
            .unwrap();

        assert!(json.starts_with(r#"{"Stainless Steel Water Bottle 750mL":"200 units","#));
        assert!(json.ends_with(r#""UV Water Purification System":"50 units","flag":0}"#));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 16);
        assert_eq!(object["flag"], serde_json::json!(0));
        assert_eq!(object["Heavy-Duty Wheelbarrow (6 cu ft)"], "50 units");
    }

    #[test]
    fn test_output_is_idempotent() {
        let extractor = OrderExtractor::default();
        let first = extractor.run(SAMPLE_ORDER_EMAIL).unwrap().to_json().unwrap();
        let second = extractor.run(SAMPLE_ORDER_EMAIL).unwrap().to_json().unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_sample_email_nearest_following_matches_positional() {
        let config = ExtractorConfig {
            pairing: PairingStrategy::NearestFollowing,
            ..Default::default()
        };
        let nearest = OrderExtractor::with_config(Catalog::default(), config)
            .run(SAMPLE_ORDER_EMAIL)
            .unwrap();
        let positional = run(&Catalog::default(), SAMPLE_ORDER_EMAIL).unwrap();
        assert_eq!(nearest, positional);
    }

    #[test]
    fn test_result_follows_document_order() {
        let catalog = catalog(&["Garden Hose", "Widget Pro", "Brass Nozzle"]);
        let email = order_email(&[
            ("Brass Nozzle", "4 pack"),
            ("Widget Pro", "12 units"),
            ("Garden Hose", "3 meter"),
        ]);

        let result = run(&catalog, &email).unwrap();
        let products: Vec<&str> = result.entries().iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(products, vec!["Brass Nozzle", "Widget Pro", "Garden Hose"]);
        assert_eq!(result.get("Garden Hose"), Some("3 meter"));
    }

    #[test]
    fn test_products_missing_from_email_are_omitted() {
        let catalog = catalog(&["Widget Pro", "Hydraulic Floor Jack", "Garden Hose"]);
        let email = order_email(&[("Widget Pro", "2 units"), ("Garden Hose", "7 units")]);

        let result = run(&catalog, &email).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("Hydraulic Floor Jack"), None);
    }

    #[test]
    fn test_misspelled_product_still_matches() {
        // One dropped letter in a 34-char name keeps the score above 90.
        let catalog = catalog(&["Stainless Steel Water Bottle 750mL"]);
        let email = order_email(&[("Stainles Steel Water Bottle 750mL", "20 units")]);

        let result = run(&catalog, &email).unwrap();
        assert_eq!(result.get("Stainless Steel Water Bottle 750mL"), Some("20 units"));
    }

    #[test]
    fn test_quantity_undercount_is_reported() {
        let catalog = catalog(&["Widget Pro", "Garden Hose"]);
        let email = order_email(&[("Widget Pro", "2 units"), ("Garden Hose", "a few")]);

        let result = run(&catalog, &email);
        assert_eq!(
            result,
            Err(ExtractionError::QuantityUndercount {
                matches: 2,
                quantities: 1
            })
        );
    }

    #[test]
    fn test_extra_quantities_are_ignored() {
        let catalog = catalog(&["Widget Pro"]);
        let mut email = order_email(&[("Widget Pro", "2 units")]);
        email.push_str("P.S. we still have 40 units of last year's order.\n");

        let result = run(&catalog, &email).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("Widget Pro"), Some("2 units"));
    }

    #[test]
    fn test_no_products_yields_flag_only() {
        let result = run(&catalog(&["Widget Pro"]), "Nothing to order today.").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.to_json().unwrap(), r#"{"flag":0}"#);
    }

    #[test]
    fn test_catalog_entry_named_flag_is_rejected() {
        let result = Catalog::new(["flag"]);
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidCatalogEntry { ref entry, .. }) if entry == "flag"
        ));
    }

    #[test]
    fn test_flag_lookalike_product_keeps_single_flag_key() {
        let catalog = catalog(&["Flag Pole"]);
        let json = run(&catalog, "Flag Pole - 3 units\n").unwrap().to_json().unwrap();
        assert_eq!(json, r#"{"Flag Pole":"3 units","flag":0}"#);
    }

    #[test]
    fn test_duplicate_catalog_entries_are_rejected() {
        let result = Catalog::new(["Widget Pro", "Garden Hose", "Widget Pro"]);
        assert!(matches!(result, Err(ExtractionError::InvalidCatalogEntry { .. })));
    }

    #[test]
    fn test_extractor_is_shareable_across_threads() {
        let extractor = std::sync::Arc::new(OrderExtractor::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let extractor = std::sync::Arc::clone(&extractor);
                std::thread::spawn(move || extractor.run(SAMPLE_ORDER_EMAIL).unwrap().to_json().unwrap())
            })
            .collect();

        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    }
}
