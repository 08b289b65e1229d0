//! Cart commands.

#![allow(clippy::print_stdout)]

use griffin_core::{CartItemId, Locale, ProductId, VariantId};
use griffin_storefront::catalog::find_product;
use griffin_storefront::checkout::PaymentMethod;
use griffin_storefront::error::add_breadcrumb;
use griffin_storefront::validation::parse_quantity;
use griffin_storefront::{AppError, Result, Storefront};

/// Print every row plus count and total.
pub fn list(storefront: &Storefront, locale: Locale) {
    let summary = storefront.cart().summary();
    if summary.is_empty() {
        println!("{}", locale.pick("Your cart is empty.", "سلة التسوق فارغة."));
        return;
    }

    for item in &summary.items {
        println!(
            "{:<16} {:<32} {:<20} x{:<4} {:>10}",
            item.id,
            item.product_title(locale),
            item.variant_name(locale),
            item.quantity,
            item.line_total().to_string()
        );
    }
    println!(
        "{}: {}    {}: {}",
        locale.pick("Items", "العناصر"),
        summary.count,
        locale.pick("Total", "الإجمالي"),
        summary.total
    );
}

/// Add a product from the resolved catalog.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for an unknown product or variant.
pub async fn add(
    storefront: &Storefront,
    locale: Locale,
    product_id: &ProductId,
    variant_id: Option<&VariantId>,
    quantity: &str,
) -> Result<()> {
    let catalog = storefront.catalog().products().await;
    let product = find_product(&catalog.products, product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let variant = match variant_id {
        Some(id) => product.variant(id),
        None => product.default_variant(),
    }
    .ok_or_else(|| AppError::NotFound(format!("variant of product {product_id}")))?;

    let quantity = parse_quantity(quantity);
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", product_id.as_str()), ("variant_id", variant.id.as_str())]),
    );
    storefront.cart().add(product, variant, quantity)?;
    list(storefront, locale);
    Ok(())
}

/// Remove a row. Unknown ids are ignored.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn remove(storefront: &Storefront, locale: Locale, item_id: &CartItemId) -> Result<()> {
    storefront.cart().remove(item_id)?;
    list(storefront, locale);
    Ok(())
}

/// Set a row's quantity; zero removes it.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for an unknown row, or a storage error.
pub fn update(
    storefront: &Storefront,
    locale: Locale,
    item_id: &CartItemId,
    quantity: u32,
) -> Result<()> {
    if storefront.cart().find(item_id).is_none() {
        return Err(AppError::NotFound(format!("cart item {item_id}")));
    }
    storefront.cart().update_quantity(item_id, quantity)?;
    list(storefront, locale);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be cleared.
pub fn clear(storefront: &Storefront) -> Result<()> {
    storefront.cart().clear()?;
    println!("Cart cleared.");
    Ok(())
}

/// Place an order and print the confirmation.
///
/// # Errors
///
/// Returns an error for an empty cart or if the cart cannot be cleared.
pub async fn checkout(
    storefront: &Storefront,
    locale: Locale,
    payment_method: PaymentMethod,
) -> Result<()> {
    println!(
        "{} ({})...",
        locale.pick("Processing", "جارٍ المعالجة"),
        payment_method.label(locale)
    );
    let confirmation = storefront.checkout().place_order(payment_method).await?;
    println!(
        "{} {}",
        locale.pick("Order placed:", "تم تقديم الطلب:"),
        confirmation.reference
    );
    println!(
        "{}: {}    {}: {}",
        locale.pick("Items", "العناصر"),
        confirmation.item_count,
        locale.pick("Total", "الإجمالي"),
        confirmation.total
    );
    Ok(())
}
