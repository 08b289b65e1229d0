//! Mapping from WooCommerce wire types to catalog products.
//!
//! The remote store has no Arabic content, so every bilingual field carries
//! the same English text in both slots.

use griffin_core::{DEFAULT_CATEGORY, Price, Product, ProductId, ProductVariant, VariantId};
use tracing::warn;

use super::types::{RemoteProduct, WooVariation};

/// Image used when a remote product has none.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

/// Id of the synthetic variant given to products without variations.
pub const DEFAULT_VARIANT_ID: &str = "default";

/// Number of feature bullets derived from the description.
const FEATURE_COUNT: usize = 3;

/// Convert a remote product (with any resolved variations) into a [`Product`].
#[must_use]
pub fn convert_product(remote: RemoteProduct) -> Product {
    let RemoteProduct {
        product,
        variations,
    } = remote;

    let id = product.id.to_string();
    let price = parse_price(&product.price, &id);

    let variants = if variations.is_empty() {
        vec![default_variant(price)]
    } else {
        variations
            .into_iter()
            .map(|v| convert_variation(v, &id))
            .collect()
    };

    let image_src = product
        .images
        .first()
        .map(|image| image.src.clone())
        .filter(|src| !src.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned());

    let category_id = product
        .categories
        .first()
        .map(|c| c.name.to_lowercase())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned());

    Product {
        features: derive_features(&product.description),
        features_ar: Vec::new(),
        title_ar: product.name.clone(),
        title: product.name,
        description_ar: product.short_description.clone(),
        description: product.short_description,
        price,
        image_src,
        variants,
        category_id,
        related_product_ids: product
            .related_ids
            .iter()
            .map(|id| ProductId::new(id.to_string()))
            .collect(),
        id: ProductId::new(id),
    }
}

fn convert_variation(variation: WooVariation, product_id: &str) -> ProductVariant {
    let name = variation
        .attributes
        .iter()
        .map(|a| a.option.as_str())
        .collect::<Vec<_>>()
        .join(" - ");

    ProductVariant {
        id: VariantId::new(variation.id.to_string()),
        name_ar: name.clone(),
        name,
        price: parse_price(&variation.price, product_id),
    }
}

/// The single variant substituted when a product declares none.
#[must_use]
pub fn default_variant(price: Price) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(DEFAULT_VARIANT_ID),
        name: "Default".to_owned(),
        name_ar: "افتراضي".to_owned(),
        price,
    }
}

/// Parse a WooCommerce decimal string.
///
/// Empty, invalid, or out-of-range values become zero. Extra decimal places
/// are rounded away.
fn parse_price(raw: &str, product_id: &str) -> Price {
    if raw.trim().is_empty() {
        return Price::ZERO;
    }
    let price = match raw.parse::<Price>() {
        Ok(price) => price.rounded(),
        Err(e) => {
            warn!(product_id, price = raw, error = %e, "Unparseable remote price, using zero");
            return Price::ZERO;
        }
    };
    if !price.is_within_limits() {
        warn!(product_id, price = raw, "Remote price out of range, using zero");
        return Price::ZERO;
    }
    price
}

/// First few sentence fragments of a free-text description.
fn derive_features(description: &str) -> Vec<String> {
    description
        .split('.')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .take(FEATURE_COUNT)
        .map(str::to_owned)
        .collect()
}
