//! Integration tests for the cart persisted to the data directory.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use griffin_core::{Price, ProductId, VariantId};
use griffin_integration_tests::TestContext;
use griffin_storefront::catalog::find_product;

#[tokio::test]
async fn test_cart_lifecycle_totals() {
    let ctx = TestContext::new();
    let catalog = ctx.storefront.catalog().products().await;
    let product = find_product(&catalog.products, &ProductId::new("1")).unwrap();
    let variant = product.variant(&VariantId::new("v1")).unwrap();
    let cart = ctx.storefront.cart();

    let items = cart.add(product, variant, 1).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(cart.total(), Price::from(599_u32));

    let items = cart.add(product, variant, 2).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(cart.total(), Price::from(1797_u32));

    let row = items[0].id.clone();
    cart.update_quantity(&row, 1).unwrap();
    assert_eq!(cart.total(), Price::from(599_u32));

    cart.remove(&row).unwrap();
    assert!(cart.items().is_empty());
    assert_eq!(cart.total(), Price::ZERO);
    assert_eq!(cart.count(), 0);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    let catalog = ctx.storefront.catalog().products().await;
    let router = find_product(&catalog.products, &ProductId::new("1")).unwrap();
    let crm = find_product(&catalog.products, &ProductId::new("3")).unwrap();

    let cart = ctx.storefront.cart();
    cart.add(router, router.variant(&VariantId::new("v2")).unwrap(), 2)
        .unwrap();
    cart.add(crm, crm.default_variant().unwrap(), 1).unwrap();

    let reopened = ctx.reopen();
    let summary = reopened.cart().summary();
    assert_eq!(summary.items.len(), 2);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.total, Price::from(999_u32 * 2 + 1799));
    assert_eq!(summary.items[0].variant_id.as_str(), "v2");
    assert_eq!(summary.items[1].product_id.as_str(), "3");
}

#[tokio::test]
async fn test_distinct_variants_get_separate_rows() {
    let ctx = TestContext::new();
    let catalog = ctx.storefront.catalog().products().await;
    let product = find_product(&catalog.products, &ProductId::new("2")).unwrap();
    let cart = ctx.storefront.cart();

    cart.add(product, &product.variants[0], 1).unwrap();
    let items = cart.add(product, &product.variants[1], 1).unwrap();

    assert_eq!(items.len(), 2);
    assert_ne!(items[0].id, items[1].id);
    assert_eq!(cart.total(), Price::from(2499_u32 + 4499));
}

#[test]
fn test_corrupt_cart_file_reads_as_empty() {
    let ctx = TestContext::new();
    std::fs::write(ctx.dir.path().join("griffin_cart_items.json"), "{not json").unwrap();

    let reopened = ctx.reopen();
    assert!(reopened.cart().items().is_empty());
    assert_eq!(reopened.cart().total(), Price::ZERO);
}

#[test]
fn test_seeded_products_persist() {
    let ctx = TestContext::new();
    ctx.storefront.initialize().unwrap();
    let first = ctx.storefront.products().list();
    assert_eq!(first.len(), 3);

    ctx.storefront
        .products()
        .delete(&first[0].id)
        .unwrap();

    let reopened = ctx.reopen();
    reopened.initialize().unwrap();
    assert_eq!(reopened.products().list().len(), 2);
}
