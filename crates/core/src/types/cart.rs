//! Shopping cart line items.

use serde::{Deserialize, Serialize};

use super::id::{CartItemId, ProductId, VariantId};
use super::locale::Locale;
use super::price::Price;
use super::product::{Product, ProductVariant};

/// One cart row: a product/variant pairing and its quantity.
///
/// Display fields are copied from the product at the moment the row is
/// created. Later edits to the product do not update existing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_title: String,
    #[serde(rename = "productTitle_ar")]
    pub product_title_ar: String,
    pub variant_id: VariantId,
    pub variant_name: String,
    #[serde(rename = "variantName_ar")]
    pub variant_name_ar: String,
    /// Unit price of the variant.
    pub price: Price,
    pub quantity: u32,
    pub image_src: String,
}

impl CartItem {
    /// Build a new row for `product`/`variant`.
    #[must_use]
    pub fn new(id: CartItemId, product: &Product, variant: &ProductVariant, quantity: u32) -> Self {
        Self {
            id,
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            product_title_ar: product.title_ar.clone(),
            variant_id: variant.id.clone(),
            variant_name: variant.name.clone(),
            variant_name_ar: variant.name_ar.clone(),
            price: variant.price,
            quantity,
            image_src: product.image_src.clone(),
        }
    }

    /// Whether this row holds the given product/variant pairing.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, variant_id: &VariantId) -> bool {
        &self.product_id == product_id && &self.variant_id == variant_id
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Product title in the given locale.
    #[must_use]
    pub fn product_title(&self, locale: Locale) -> &str {
        locale.pick(&self.product_title, &self.product_title_ar)
    }

    /// Variant name in the given locale.
    #[must_use]
    pub fn variant_name(&self, locale: Locale) -> &str {
        locale.pick(&self.variant_name, &self.variant_name_ar)
    }
}
