//! Admin product collection commands.

#![allow(clippy::print_stdout)]

use clap::Args;
use griffin_core::{Locale, ProductId};
use griffin_storefront::validation::ProductDraft;
use griffin_storefront::{AppError, Result, Storefront};

use super::{product_detail, product_line};

/// Product form fields. Omitted fields keep the stored value when `--id`
/// names an existing product.
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Existing product id (omit to create a new product)
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub title_ar: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub description_ar: Option<String>,

    /// Base price, e.g. 349.99
    #[arg(long)]
    pub price: Option<String>,

    /// Absolute image URL
    #[arg(long)]
    pub image_src: Option<String>,

    /// Feature line (repeatable)
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Arabic feature line (repeatable)
    #[arg(long = "feature-ar")]
    pub features_ar: Vec<String>,

    #[arg(long)]
    pub category: Option<String>,
}

impl SaveArgs {
    fn into_draft(self, existing: Option<ProductDraft>) -> ProductDraft {
        let base = existing.unwrap_or_default();
        let lines = |values: Vec<String>, fallback: String| {
            if values.is_empty() {
                fallback
            } else {
                values.join("\n")
            }
        };

        ProductDraft {
            id: self.id.unwrap_or(base.id),
            title: self.title.unwrap_or(base.title),
            title_ar: self.title_ar.unwrap_or(base.title_ar),
            description: self.description.unwrap_or(base.description),
            description_ar: self.description_ar.unwrap_or(base.description_ar),
            price: self.price.unwrap_or(base.price),
            image_src: self.image_src.unwrap_or(base.image_src),
            features: lines(self.features, base.features),
            features_ar: lines(self.features_ar, base.features_ar),
            category_id: self.category.unwrap_or(base.category_id),
        }
    }
}

/// Seed the demo products into an empty collection.
///
/// # Errors
///
/// Returns an error if the collection cannot be written.
pub fn seed(storefront: &Storefront) -> Result<()> {
    if storefront.products().initialize()? {
        println!("Seeded demo products.");
    } else {
        println!("Product collection already populated.");
    }
    Ok(())
}

pub fn list(storefront: &Storefront, locale: Locale) {
    for product in storefront.products().list() {
        println!("{}", product_line(&product, locale));
    }
}

/// # Errors
///
/// Returns [`AppError::NotFound`] for an unknown id.
pub fn show(storefront: &Storefront, locale: Locale, product_id: &ProductId) -> Result<()> {
    let product = storefront
        .products()
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
    print!("{}", product_detail(&product, locale));
    Ok(())
}

/// Validate the form and upsert the product.
///
/// # Errors
///
/// Returns every rejected field, or a storage error.
pub fn save(storefront: &Storefront, args: SaveArgs) -> Result<()> {
    let existing = args
        .id
        .as_deref()
        .and_then(|id| storefront.products().get(&ProductId::new(id)))
        .map(|product| ProductDraft::from_product(&product));

    let product = args.into_draft(existing).validate()?;
    let id = product.id.clone();
    storefront.products().save(product)?;
    println!("Saved product {id}.");
    Ok(())
}

/// # Errors
///
/// Returns [`AppError::NotFound`] for an unknown id, or a storage error.
pub fn delete(storefront: &Storefront, product_id: &ProductId) -> Result<()> {
    if !storefront.products().delete(product_id)? {
        return Err(AppError::NotFound(format!("product {product_id}")));
    }
    println!("Deleted product {product_id}.");
    Ok(())
}

pub fn featured(storefront: &Storefront, locale: Locale, limit: Option<usize>) {
    for product in storefront.products().featured(limit) {
        println!("{}", product_line(&product, locale));
    }
}
