//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type. Entry points report server-side
//! failures with [`AppError::report`] and show customers only
//! [`AppError::user_message`].

use griffin_core::Locale;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;
use crate::validation::ValidationErrors;
use crate::woocommerce::{SettingsError, WooCommerceError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing a persisted record failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// WooCommerce API operation failed.
    #[error("WooCommerce error: {0}")]
    WooCommerce(#[from] WooCommerceError),

    /// Remote catalog settings were rejected.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Form input was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Checkout could not complete.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether this is a failure of the system rather than of the input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::WooCommerce(_)
                | Self::Config(_)
                | Self::Checkout(CheckoutError::Storage(_))
        )
    }

    /// Message safe to show a customer, in `locale`.
    ///
    /// Internal details are never included.
    #[must_use]
    pub fn user_message(&self, locale: Locale) -> String {
        let text = |en: &str, ar: &str| locale.pick(en, ar).to_owned();
        match self {
            Self::Storage(_) | Self::Checkout(CheckoutError::Storage(_)) => text(
                "Your changes could not be saved. Please try again.",
                "تعذر حفظ التغييرات. يرجى المحاولة مرة أخرى.",
            ),
            Self::WooCommerce(_) => text(
                "Failed to load products from the store.",
                "فشل تحميل المنتجات من المتجر.",
            ),
            Self::Settings(_) => text(
                "Please check the store URL and API keys.",
                "يرجى التحقق من رابط المتجر ومفاتيح API.",
            ),
            Self::Config(_) => text(
                "The storefront is not configured correctly.",
                "لم يتم إعداد المتجر بشكل صحيح.",
            ),
            Self::Validation(errors) => errors.messages(locale).join("\n"),
            Self::Checkout(CheckoutError::EmptyCart) => {
                text("Your cart is empty.", "سلة التسوق فارغة.")
            }
            Self::NotFound(_) => text("Not found.", "غير موجود."),
        }
    }

    /// Log the error and, for internal failures, capture it to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validation::{Field, ValidationError};

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: cannot check out an empty cart");
    }

    #[test]
    fn test_user_message_is_localized() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.user_message(Locale::En), "Your cart is empty.");
        assert_eq!(err.user_message(Locale::Ar), "سلة التسوق فارغة.");
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::from(StorageError::InvalidKey("../etc/passwd".to_string()));
        assert!(err.is_internal());
        assert!(!err.user_message(Locale::En).contains("passwd"));

        let err = AppError::from(WooCommerceError::Status {
            status: 401,
            body: "consumer key invalid".to_string(),
        });
        assert!(!err.user_message(Locale::En).contains("consumer key"));
    }

    #[test]
    fn test_validation_messages_pass_through() {
        let err = AppError::from(ValidationErrors(vec![
            ValidationError::new(Field::Title),
            ValidationError::new(Field::Price),
        ]));
        assert!(!err.is_internal());
        assert_eq!(
            err.user_message(Locale::En),
            "Title must be at least 2 characters\nPrice must be a positive number"
        );
    }
}
