//! # Product/Quantity Pairing
//!
//! Joins matched products with the quantity tokens found in the residual text
//! and builds the final result mapping.

use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::extraction_errors::ExtractionError;
use crate::product_matching::ProductMatch;
use crate::text_processing::QuantityToken;

/// Key of the status field appended to every result
pub const FLAG_KEY: &str = "flag";

/// Value of the opaque status field appended to every result
pub const RESULT_FLAG: u8 = 0;

/// How matched products are joined with quantity tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingStrategy {
    /// i-th product in document order takes the i-th quantity token
    #[default]
    Positional,
    /// Each product takes the first unclaimed quantity token between the end
    /// of its span and the start of the next matched product
    NearestFollowing,
}

impl FromStr for PairingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positional" => Ok(PairingStrategy::Positional),
            "nearest" | "nearest_following" | "nearest-following" => {
                Ok(PairingStrategy::NearestFollowing)
            }
            other => Err(format!(
                "unknown pairing strategy '{}' (expected 'positional' or 'nearest')",
                other
            )),
        }
    }
}

impl std::fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingStrategy::Positional => write!(f, "positional"),
            PairingStrategy::NearestFollowing => write!(f, "nearest"),
        }
    }
}

/// Product name → quantity text, in the order pairs were produced
///
/// Serializes as a flat JSON object with a trailing `"flag": 0` entry. A
/// product stored under the `flag` key is left out so the key stays unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultMapping {
    entries: Vec<(String, String)>,
}

impl ResultMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a product's quantity, keeping its first position
    pub fn insert(&mut self, product: impl Into<String>, quantity: impl Into<String>) {
        let product = product.into();
        let quantity = quantity.into();
        match self.entries.iter_mut().find(|(p, _)| *p == product) {
            Some(entry) => entry.1 = quantity,
            None => self.entries.push((product, quantity)),
        }
    }

    pub fn get(&self, product: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == product)
            .map(|(_, q)| q.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flag(&self) -> u8 {
        RESULT_FLAG
    }

    /// Compact JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ResultMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let products: Vec<_> = self
            .entries
            .iter()
            .filter(|(product, _)| product != FLAG_KEY)
            .collect();
        let mut map = serializer.serialize_map(Some(products.len() + 1))?;
        for (product, quantity) in products {
            map.serialize_entry(product, quantity)?;
        }
        map.serialize_entry(FLAG_KEY, &RESULT_FLAG)?;
        map.end()
    }
}

/// Pair matched products with quantity tokens
///
/// Matches are first put in document order (ascending start offset).
pub fn pair(
    matches: &[ProductMatch],
    quantities: &[QuantityToken],
    strategy: PairingStrategy,
) -> Result<ResultMapping, ExtractionError> {
    let mut ordered: Vec<&ProductMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.start);

    match strategy {
        PairingStrategy::Positional => pair_positional(&ordered, quantities),
        PairingStrategy::NearestFollowing => Ok(pair_nearest_following(&ordered, quantities)),
    }
}

fn pair_positional(
    ordered: &[&ProductMatch],
    quantities: &[QuantityToken],
) -> Result<ResultMapping, ExtractionError> {
    if quantities.len() < ordered.len() {
        return Err(ExtractionError::QuantityUndercount {
            matches: ordered.len(),
            quantities: quantities.len(),
        });
    }
    if quantities.len() > ordered.len() {
        warn!(
            matches = ordered.len(),
            quantities = quantities.len(),
            "Ignoring quantity tokens beyond the matched products"
        );
    }

    let mut mapping = ResultMapping::new();
    for (product, quantity) in ordered.iter().zip(quantities) {
        debug!(product = %product.product, quantity = %quantity.text, "Paired by position");
        mapping.insert(product.product.as_str(), quantity.text.as_str());
    }
    Ok(mapping)
}

fn pair_nearest_following(ordered: &[&ProductMatch], quantities: &[QuantityToken]) -> ResultMapping {
    let mut claimed = vec![false; quantities.len()];
    let mut mapping = ResultMapping::new();

    for (index, product) in ordered.iter().enumerate() {
        // A quantity past the next product's start belongs to that product.
        let next_start = ordered
            .get(index + 1)
            .map_or(usize::MAX, |next| next.start);
        let candidate = quantities.iter().enumerate().find(|(i, q)| {
            !claimed[*i] && q.source_start >= product.end && q.source_start < next_start
        });

        match candidate {
            Some((i, quantity)) => {
                claimed[i] = true;
                debug!(product = %product.product, quantity = %quantity.text, "Paired with following quantity");
                mapping.insert(product.product.as_str(), quantity.text.as_str());
            }
            None => warn!(product = %product.product, "No quantity token follows matched product"),
        }
    }

    mapping
}
