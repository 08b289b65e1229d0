//! Demo catalog compiled into the binary.

use griffin_core::{Product, Service};
use serde::de::DeserializeOwned;
use tracing::error;

const SHOP_PRODUCTS: &str = include_str!("../../data/shop_products.json");
const SERVICES: &str = include_str!("../../data/services.json");
const SEED_PRODUCTS: &str = include_str!("../../data/seed_products.json");

/// Locally held products and services, shown when no remote catalog is
/// configured or reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalCatalog {
    pub products: Vec<Product>,
    pub services: Vec<Service>,
}

impl LocalCatalog {
    #[must_use]
    pub const fn new(products: Vec<Product>, services: Vec<Service>) -> Self {
        Self { products, services }
    }

    /// The built-in shop products and service cards.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            products: parse_embedded("shop_products", SHOP_PRODUCTS),
            services: parse_embedded("services", SERVICES),
        }
    }
}

/// Products written to an empty admin collection by
/// [`ProductStore::initialize`](super::ProductStore::initialize).
#[must_use]
pub fn seed_products() -> Vec<Product> {
    parse_embedded("seed_products", SEED_PRODUCTS)
}

fn parse_embedded<T: DeserializeOwned>(name: &str, raw: &str) -> Vec<T> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!(dataset = name, error = %e, "Embedded demo data is malformed");
        Vec::new()
    })
}
