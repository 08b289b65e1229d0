//! Wire types for the WooCommerce REST API (`/wp-json/wc/v3`).
//!
//! Only the fields the storefront reads are modelled. Every field defaults
//! so that sparse or plugin-modified payloads still deserialize.

use serde::{Deserialize, Serialize};

/// Product image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WooImage {
    pub src: String,
    pub alt: String,
}

/// Product category reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WooCategory {
    pub id: u64,
    pub name: String,
}

/// Product-level attribute definition (e.g. "Size" with its options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WooAttribute {
    pub name: String,
    pub options: Vec<String>,
    pub variation: bool,
}

/// A product as returned by `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WooProduct {
    pub id: u64,
    pub name: String,
    /// Decimal string, may be empty for unpriced products.
    pub price: String,
    pub regular_price: String,
    pub sale_price: String,
    /// Long description (HTML).
    pub description: String,
    pub short_description: String,
    pub images: Vec<WooImage>,
    pub categories: Vec<WooCategory>,
    pub attributes: Vec<WooAttribute>,
    /// IDs of child variations, resolved with a second request.
    pub variations: Vec<u64>,
    pub related_ids: Vec<u64>,
}

impl WooProduct {
    /// Whether the product declares child variations.
    #[must_use]
    pub fn has_variations(&self) -> bool {
        !self.variations.is_empty()
    }
}

/// Selected option of a variation (e.g. `Size: Large`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WooVariationAttribute {
    pub name: String,
    pub option: String,
}

/// A variation as returned by `GET /products/{id}/variations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WooVariation {
    pub id: u64,
    pub attributes: Vec<WooVariationAttribute>,
    pub price: String,
    pub regular_price: String,
}

/// A remote product together with its resolved variations.
///
/// `variations` is empty when the product declares none, or when resolving
/// them failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteProduct {
    pub product: WooProduct,
    pub variations: Vec<WooVariation>,
}

impl RemoteProduct {
    /// A product with no resolved variations.
    #[must_use]
    pub const fn without_variations(product: WooProduct) -> Self {
        Self {
            product,
            variations: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_sparse_product() {
        let product: WooProduct =
            serde_json::from_str(r#"{"id": 42, "name": "Router", "price": "199.00"}"#).unwrap();
        assert_eq!(product.id, 42);
        assert!(product.images.is_empty());
        assert!(!product.has_variations());
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let json = r#"{
            "id": 7,
            "name": "Switch",
            "slug": "switch",
            "variations": [71, 72],
            "meta_data": [{"key": "x", "value": "y"}]
        }"#;
        let product: WooProduct = serde_json::from_str(json).unwrap();
        assert!(product.has_variations());
        assert_eq!(product.variations, vec![71, 72]);
    }
}
