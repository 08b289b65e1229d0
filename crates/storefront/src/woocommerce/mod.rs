//! WooCommerce REST catalog integration.
//!
//! # Architecture
//!
//! - Plain `reqwest` over the v3 REST API, key/secret passed as query parameters
//! - Products first, then variations for variable products (concurrently)
//! - A failed variation lookup degrades one product, never the whole catalog
//! - Transient failures are retried with exponential backoff
//!
//! Request URLs carry credentials, so errors are stored with their URL
//! stripped and logs only ever show the path.
//!
//! # Example
//!
//! ```rust,ignore
//! use griffin_storefront::woocommerce::{WooCommerceClient, WooCommerceConfig};
//!
//! let config = WooCommerceConfig::parse("https://shop.example.com", key, secret)?;
//! let client = WooCommerceClient::new(config);
//! let catalog = client.fetch_catalog().await?;
//! ```

mod client;
mod conversions;
mod retry;
mod settings;
pub mod types;

pub use client::WooCommerceClient;
pub use conversions::{DEFAULT_VARIANT_ID, PLACEHOLDER_IMAGE, convert_product, default_variant};
pub use retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES, RetryPolicy};
pub use settings::{SettingsError, WooCommerceConfig, WooSettings};
pub use types::RemoteProduct;

use thiserror::Error;

/// Errors that can occur when talking to a WooCommerce store.
#[derive(Debug, Error)]
pub enum WooCommerceError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Server answered with a non-success status.
    #[error("WooCommerce returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configured site URL cannot carry an API path.
    #[error("Invalid site URL: {0}")]
    InvalidSiteUrl(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for WooCommerceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_woocommerce_error_display() {
        let err = WooCommerceError::NotFound("/wp-json/wc/v3/products/9".to_string());
        assert_eq!(err.to_string(), "Not found: /wp-json/wc/v3/products/9");

        let err = WooCommerceError::Status {
            status: 401,
            body: "woocommerce_rest_cannot_view".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "WooCommerce returned HTTP 401: woocommerce_rest_cannot_view"
        );

        let err = WooCommerceError::InvalidSiteUrl("mailto:a@b".to_string());
        assert_eq!(err.to_string(), "Invalid site URL: mailto:a@b");
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err = serde_json::from_str::<Vec<u64>>("{").unwrap_err();
        let err: WooCommerceError = serde_err.into();
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[tokio::test]
    async fn test_http_error_drops_credentials() {
        let reqwest_err = reqwest::Client::new()
            .get("http://127.0.0.1:1/wp-json/wc/v3/products?consumer_key=ck_secret")
            .send()
            .await
            .unwrap_err();
        let err: WooCommerceError = reqwest_err.into();
        assert!(!err.to_string().contains("ck_secret"));
    }
}
