//! Product and service catalog.
//!
//! - [`LocalCatalog`] - demo products and services compiled into the binary
//! - [`ProductStore`] - admin-managed products persisted in the local store
//! - [`CatalogAggregator`] - local list combined with the optional remote catalog
//! - [`CachedCatalog`] - the aggregator behind a short-lived request cache

mod aggregator;
mod cache;
mod demo;
mod products;
mod services;

pub use aggregator::{
    Catalog, CatalogAggregator, CatalogEntry, CatalogOrigin, CatalogPolicy, MergeMode,
    ServiceCatalog, UnknownMergeMode,
};
pub use cache::{CachedCatalog, DEFAULT_CATALOG_TTL};
pub use demo::{LocalCatalog, seed_products};
pub use products::{DEFAULT_FEATURED_LIMIT, ProductStore};
pub use services::{
    REMOTE_RELIABILITY_PERCENT, SERVICE_PLACEHOLDER_IMAGE, merge_services, service_from_remote,
};

use griffin_core::{Product, ProductId};

/// Look up a product by id.
#[must_use]
pub fn find_product<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| &p.id == id)
}

/// Resolve `product`'s related ids against `products`.
///
/// Ids with no matching product are skipped. Order follows
/// `related_product_ids`.
#[must_use]
pub fn related_products<'a>(products: &'a [Product], product: &Product) -> Vec<&'a Product> {
    product
        .related_product_ids
        .iter()
        .filter_map(|id| find_product(products, id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_find_product() {
        let products = LocalCatalog::demo().products;
        let found = find_product(&products, &ProductId::new("3")).unwrap();
        assert_eq!(found.title, "CRM Customization");
        assert!(find_product(&products, &ProductId::new("99")).is_none());
    }

    #[test]
    fn test_related_products_keep_order_and_drop_dangling() {
        let products = LocalCatalog::demo().products;
        let mut product = find_product(&products, &ProductId::new("1")).unwrap().clone();
        product.related_product_ids = vec![
            ProductId::new("5"),
            ProductId::new("missing"),
            ProductId::new("2"),
        ];

        let related: Vec<&str> = related_products(&products, &product)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(related, vec!["5", "2"]);
    }
}
