//! Input validation at the point of entry.
//!
//! Form input is checked here before it reaches a store. Failures carry a
//! message in both storefront languages.

use std::fmt;

use chrono::Utc;
use griffin_core::{DEFAULT_CATEGORY, Locale, Price, Product, ProductId};
use thiserror::Error;
use url::Url;

use crate::woocommerce::default_variant;

const MIN_TITLE_CHARS: usize = 2;
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Parse a quantity typed into the cart drawer.
///
/// Anything that is not a whole number of at least one becomes `1`.
#[must_use]
pub fn parse_quantity(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&q| q >= 1)
        .unwrap_or(1)
}

/// Product form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    TitleAr,
    Description,
    DescriptionAr,
    Price,
    ImageSrc,
}

impl Field {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TitleAr => "title_ar",
            Self::Description => "description",
            Self::DescriptionAr => "description_ar",
            Self::Price => "price",
            Self::ImageSrc => "imageSrc",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rejected form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub field: Field,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message(Locale::En))
    }
}

impl ValidationError {
    #[must_use]
    pub const fn new(field: Field) -> Self {
        Self { field }
    }

    /// Inline message for the field, in `locale`.
    #[must_use]
    pub const fn message(&self, locale: Locale) -> &'static str {
        match (self.field, locale) {
            (Field::Title, Locale::En) => "Title must be at least 2 characters",
            (Field::Title, Locale::Ar) => "العنوان يجب أن يكون على الأقل حرفين",
            (Field::TitleAr, Locale::En) => "Arabic title must be at least 2 characters",
            (Field::TitleAr, Locale::Ar) => "العنوان العربي يجب أن يكون على الأقل حرفين",
            (Field::Description, Locale::En) => "Description must be at least 10 characters",
            (Field::Description, Locale::Ar) => "الوصف يجب أن يكون على الأقل 10 أحرف",
            (Field::DescriptionAr, Locale::En) => {
                "Arabic description must be at least 10 characters"
            }
            (Field::DescriptionAr, Locale::Ar) => "الوصف العربي يجب أن يكون على الأقل 10 أحرف",
            (Field::Price, Locale::En) => "Price must be a positive number",
            (Field::Price, Locale::Ar) => "السعر يجب أن يكون رقمًا موجبًا",
            (Field::ImageSrc, Locale::En) => "Please enter a valid image URL",
            (Field::ImageSrc, Locale::Ar) => "يرجى إدخال رابط صورة صالح",
        }
    }
}

/// Every rejected field of one form submission, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Whether `field` was rejected.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// One message per rejected field, in `locale`.
    #[must_use]
    pub fn messages(&self, locale: Locale) -> Vec<&'static str> {
        self.0.iter().map(|e| e.message(locale)).collect()
    }
}

/// Raw admin product form.
///
/// Features are entered one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Existing id when editing; blank for a new product.
    pub id: String,
    pub title: String,
    pub title_ar: String,
    pub description: String,
    pub description_ar: String,
    pub price: String,
    pub image_src: String,
    pub features: String,
    pub features_ar: String,
    /// Blank for the default category.
    pub category_id: String,
}

impl ProductDraft {
    /// Pre-fill the form from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            title_ar: product.title_ar.clone(),
            description: product.description.clone(),
            description_ar: product.description_ar.clone(),
            price: product.price.amount().to_string(),
            image_src: product.image_src.clone(),
            features: product.features.join("\n"),
            features_ar: product.features_ar.join("\n"),
            category_id: product.category_id.clone(),
        }
    }

    /// Check every field and build the product.
    ///
    /// The product gets a single default variant at the entered price and
    /// no related products.
    ///
    /// # Errors
    ///
    /// Returns every rejected field, not just the first.
    pub fn validate(&self) -> Result<Product, ValidationErrors> {
        let mut errors = Vec::new();

        if !has_min_chars(&self.title, MIN_TITLE_CHARS) {
            errors.push(ValidationError::new(Field::Title));
        }
        if !has_min_chars(&self.title_ar, MIN_TITLE_CHARS) {
            errors.push(ValidationError::new(Field::TitleAr));
        }
        if !has_min_chars(&self.description, MIN_DESCRIPTION_CHARS) {
            errors.push(ValidationError::new(Field::Description));
        }
        if !has_min_chars(&self.description_ar, MIN_DESCRIPTION_CHARS) {
            errors.push(ValidationError::new(Field::DescriptionAr));
        }
        let price = self
            .price
            .parse::<Price>()
            .ok()
            .filter(|price| price.is_positive() && price.is_within_limits());
        if price.is_none() {
            errors.push(ValidationError::new(Field::Price));
        }
        if Url::parse(self.image_src.trim()).is_err() {
            errors.push(ValidationError::new(Field::ImageSrc));
        }

        let Some(price) = price else {
            return Err(ValidationErrors(errors));
        };
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let id = match self.id.trim() {
            "" => format!("product_{}", Utc::now().timestamp_millis()),
            id => id.to_owned(),
        };
        let category_id = match self.category_id.trim() {
            "" => DEFAULT_CATEGORY.to_owned(),
            category => category.to_owned(),
        };

        Ok(Product {
            id: ProductId::new(id),
            title: self.title.trim().to_owned(),
            title_ar: self.title_ar.trim().to_owned(),
            description: self.description.trim().to_owned(),
            description_ar: self.description_ar.trim().to_owned(),
            price,
            image_src: self.image_src.trim().to_owned(),
            variants: vec![default_variant(price)],
            features: split_lines(&self.features),
            features_ar: split_lines(&self.features_ar),
            category_id,
            related_product_ids: Vec::new(),
        })
    }
}

fn has_min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            id: String::new(),
            title: "Firewall Setup".to_owned(),
            title_ar: "إعداد جدار الحماية".to_owned(),
            description: "Managed firewall installation.".to_owned(),
            description_ar: "تركيب جدار حماية مُدار بالكامل.".to_owned(),
            price: "349.99".to_owned(),
            image_src: "https://cdn.example/fw.png".to_owned(),
            features: "Threat blocking\n\n  VPN support  \n".to_owned(),
            features_ar: "حظر التهديدات".to_owned(),
            category_id: String::new(),
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("-2"), 1);
        assert_eq!(parse_quantity("2.5"), 1);
        assert_eq!(parse_quantity("lots"), 1);
        assert_eq!(parse_quantity(""), 1);
    }

    #[test]
    fn test_valid_draft() {
        let product = draft().validate().unwrap();

        assert!(product.id.as_str().starts_with("product_"));
        assert_eq!(product.category_id, "general");
        assert_eq!(product.price, "349.99".parse().unwrap());
        assert_eq!(product.features, vec!["Threat blocking", "VPN support"]);
        assert_eq!(product.features_ar, vec!["حظر التهديدات"]);
        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.variants[0].name, "Default");
        assert_eq!(product.variants[0].price, product.price);
        assert!(product.related_product_ids.is_empty());
    }

    #[test]
    fn test_edit_keeps_id_and_category() {
        let mut form = draft();
        form.id = "product_1".to_owned();
        form.category_id = "security".to_owned();
        let product = form.validate().unwrap();
        assert_eq!(product.id.as_str(), "product_1");
        assert_eq!(product.category_id, "security");
    }

    #[test]
    fn test_reports_every_invalid_field() {
        let form = ProductDraft {
            title: "A".to_owned(),
            description: "short".to_owned(),
            price: "0".to_owned(),
            image_src: "fw.png".to_owned(),
            ..draft()
        };
        let errors = form.validate().unwrap_err();

        assert!(errors.has(Field::Title));
        assert!(errors.has(Field::Description));
        assert!(errors.has(Field::Price));
        assert!(errors.has(Field::ImageSrc));
        assert!(!errors.has(Field::TitleAr));
        assert_eq!(errors.errors().len(), 4);
    }

    #[test]
    fn test_price_must_be_a_positive_number() {
        for price in [
            "",
            "abc",
            "-5",
            "0.00",
            "19.999",
            "1000000000.01",
            "10000000000000000000000000000",
            "79228162514264337593543950335",
        ] {
            let form = ProductDraft {
                price: price.to_owned(),
                ..draft()
            };
            assert!(form.validate().unwrap_err().has(Field::Price), "{price}");
        }
    }

    #[test]
    fn test_bilingual_messages() {
        let errors = ProductDraft {
            price: "free".to_owned(),
            ..draft()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            errors.messages(Locale::En),
            vec!["Price must be a positive number"]
        );
        assert_eq!(
            errors.messages(Locale::Ar),
            vec!["السعر يجب أن يكون رقمًا موجبًا"]
        );
        assert_eq!(errors.to_string(), "price: Price must be a positive number");
    }

    #[test]
    fn test_draft_round_trips_product() {
        let product = draft().validate().unwrap();
        let form = ProductDraft::from_product(&product);
        assert_eq!(form.validate().unwrap(), product);
    }
}
