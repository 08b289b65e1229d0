//! Subcommand implementations.
//!
//! Commands print human-readable output to stdout in the selected locale.

pub mod cart;
pub mod catalog;
pub mod products;
pub mod services;
pub mod woo;

use griffin_core::{Locale, Product};

/// One-line product summary: id, localized title, base price.
fn product_line(product: &Product, locale: Locale) -> String {
    format!(
        "{:<12} {:<40} {:>10}",
        product.id,
        product.title(locale),
        product.price.to_string()
    )
}

/// Multi-line product detail block.
fn product_detail(product: &Product, locale: Locale) -> String {
    let mut out = format!(
        "{} ({})\n{}\nPrice: {}\nCategory: {}\nImage: {}\n",
        product.title(locale),
        product.id,
        product.description(locale),
        product.price,
        product.category_id,
        product.image_src
    );

    out.push_str("Variants:\n");
    for variant in &product.variants {
        out.push_str(&format!(
            "  {:<16} {:<30} {:>10}\n",
            variant.id,
            variant.name(locale),
            variant.price.to_string()
        ));
    }

    let features = product.features(locale);
    if !features.is_empty() {
        out.push_str("Features:\n");
        for feature in features {
            out.push_str(&format!("  - {feature}\n"));
        }
    }
    out
}
