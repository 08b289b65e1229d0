//! Resolved catalog commands.

#![allow(clippy::print_stdout)]

use griffin_core::{Locale, ProductId};
use griffin_storefront::catalog::{find_product, related_products};
use griffin_storefront::{AppError, Result, Storefront};

use super::{product_detail, product_line};

/// List the resolved catalog and its origin.
pub async fn list(storefront: &Storefront, locale: Locale) {
    let catalog = storefront.catalog().products().await;
    println!("Source: {}", catalog.origin);
    for product in &catalog.products {
        println!("{}", product_line(product, locale));
    }
}

/// Show one product with its related products.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if the catalog has no such product.
pub async fn show(storefront: &Storefront, locale: Locale, product_id: &ProductId) -> Result<()> {
    let catalog = storefront.catalog().products().await;
    let product = find_product(&catalog.products, product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    print!("{}", product_detail(product, locale));

    let related = related_products(&catalog.products, product);
    if !related.is_empty() {
        println!("{}:", locale.pick("Related products", "منتجات ذات صلة"));
        for product in related {
            println!("  {}", product_line(product, locale));
        }
    }
    Ok(())
}
