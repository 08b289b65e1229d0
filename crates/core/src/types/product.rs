//! Catalog product types.
//!
//! Field names follow the persisted JSON records: camelCase keys with an
//! `_ar` suffix for the Arabic slot of each bilingual field.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::locale::Locale;
use super::price::Price;

/// Category assigned when none is known.
pub const DEFAULT_CATEGORY: &str = "general";

/// A purchasable configuration of a product (size, tier, seat count...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    pub name_ar: String,
    pub price: Price,
}

impl ProductVariant {
    /// Variant name in the given locale.
    #[must_use]
    pub fn name(&self, locale: Locale) -> &str {
        locale.pick(&self.name, &self.name_ar)
    }
}

/// A catalog entry.
///
/// A well-formed product always has at least one variant; use
/// [`Product::default_variant`] rather than indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(rename = "title_ar")]
    pub title_ar: String,
    pub description: String,
    #[serde(rename = "description_ar")]
    pub description_ar: String,
    /// Base price shown before a variant is chosen.
    pub price: Price,
    pub image_src: String,
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, rename = "features_ar")]
    pub features_ar: Vec<String>,
    pub category_id: String,
    /// Weak references: ids here may not exist in any catalog.
    #[serde(default)]
    pub related_product_ids: Vec<ProductId>,
}

impl Product {
    /// Title in the given locale.
    #[must_use]
    pub fn title(&self, locale: Locale) -> &str {
        locale.pick(&self.title, &self.title_ar)
    }

    /// Description in the given locale.
    #[must_use]
    pub fn description(&self, locale: Locale) -> &str {
        locale.pick(&self.description, &self.description_ar)
    }

    /// Feature bullets in the given locale.
    #[must_use]
    pub fn features(&self, locale: Locale) -> &[String] {
        locale.pick(self.features.as_slice(), self.features_ar.as_slice())
    }

    /// The variant preselected in the storefront (the first one).
    #[must_use]
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }

    /// Look up a variant by id.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VPN_JSON: &str = r#"{
        "id": "1",
        "title": "VPN Installation",
        "title_ar": "تركيب VPN",
        "price": 599,
        "description": "Secure encrypted connection for remote teams.",
        "description_ar": "اتصال مشفر آمن للفرق البعيدة.",
        "imageSrc": "https://via.placeholder.com/300",
        "variants": [
            { "id": "v1", "name": "Basic", "name_ar": "أساسي", "price": 599 },
            { "id": "v2", "name": "Premium", "name_ar": "متميز", "price": 999 }
        ],
        "features": ["24/7 Support"],
        "features_ar": ["دعم على مدار 24/7"],
        "categoryId": "vpn",
        "relatedProductIds": ["2", "5"]
    }"#;

    #[test]
    fn test_parses_persisted_record() {
        let product: Product = serde_json::from_str(VPN_JSON).unwrap();
        assert_eq!(product.id, ProductId::new("1"));
        assert_eq!(product.price, Price::from(599_u32));
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.category_id, "vpn");
        assert_eq!(
            product.related_product_ids,
            vec![ProductId::new("2"), ProductId::new("5")]
        );
    }

    #[test]
    fn test_serializes_with_record_field_names() {
        let product: Product = serde_json::from_str(VPN_JSON).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("title_ar").is_some());
        assert!(value.get("imageSrc").is_some());
        assert!(value.get("categoryId").is_some());
        assert!(value.get("relatedProductIds").is_some());
        assert!(value["variants"][0].get("name_ar").is_some());
    }

    #[test]
    fn test_localized_accessors() {
        let product: Product = serde_json::from_str(VPN_JSON).unwrap();
        assert_eq!(product.title(Locale::Ar), "تركيب VPN");
        assert_eq!(product.features(Locale::En), ["24/7 Support"]);
        let variant = product.default_variant().unwrap();
        assert_eq!(variant.name(Locale::Ar), "أساسي");
    }

    #[test]
    fn test_variant_lookup() {
        let product: Product = serde_json::from_str(VPN_JSON).unwrap();
        let premium = product.variant(&VariantId::new("v2")).unwrap();
        assert_eq!(premium.price, Price::from(999_u32));
        assert!(product.variant(&VariantId::new("v9")).is_none());
    }

    #[test]
    fn test_missing_optional_lists_default_empty() {
        let json = r#"{
            "id": "x", "title": "T", "title_ar": "T", "description": "D",
            "description_ar": "D", "price": 1, "imageSrc": "", "variants": [],
            "categoryId": "general"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.features.is_empty());
        assert!(product.related_product_ids.is_empty());
        assert!(product.default_variant().is_none());
    }
}
