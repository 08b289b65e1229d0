//! WooCommerce REST API client.
//!
//! Authenticates with consumer key/secret query parameters. Catalog fetches
//! are two-stage: the product list first, then each variable product's
//! variations concurrently.

use std::sync::Arc;

use futures::future::join_all;
use griffin_core::Product;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::conversions::convert_product;
use super::retry::{RetryPolicy, send_with_retry};
use super::settings::WooCommerceConfig;
use super::types::{RemoteProduct, WooProduct, WooVariation};
use super::WooCommerceError;

/// Number of body characters kept in error logs and messages.
const BODY_PREVIEW_CHARS: usize = 500;

/// Client for the WooCommerce REST API (`/wp-json/wc/v3`).
#[derive(Clone)]
pub struct WooCommerceClient {
    inner: Arc<WooCommerceClientInner>,
}

struct WooCommerceClientInner {
    client: reqwest::Client,
    config: WooCommerceConfig,
    retry: RetryPolicy,
}

impl WooCommerceClient {
    /// Create a client with its own HTTP connection pool and default retries.
    #[must_use]
    pub fn new(config: WooCommerceConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config, RetryPolicy::default())
    }

    /// Create a client that shares an existing HTTP connection pool.
    #[must_use]
    pub fn with_http_client(
        client: reqwest::Client,
        config: WooCommerceConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(WooCommerceClientInner {
                client,
                config,
                retry,
            }),
        }
    }

    /// Site this client talks to.
    #[must_use]
    pub fn site_url(&self) -> &Url {
        &self.inner.config.site_url
    }

    /// Build an authenticated API URL from path segments below `wc/v3`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, WooCommerceError> {
        let config = &self.inner.config;
        let mut url = config.site_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                WooCommerceError::InvalidSiteUrl(config.site_url.to_string())
            })?;
            path.pop_if_empty().extend(["wp-json", "wc", "v3"]).extend(segments);
        }
        url.query_pairs_mut()
            .append_pair("consumer_key", config.consumer_key.expose_secret())
            .append_pair("consumer_secret", config.consumer_secret.expose_secret());
        Ok(url)
    }

    /// GET a JSON resource.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, WooCommerceError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_owned();

        let response = send_with_retry(self.inner.retry, || {
            self.inner.client.get(url.clone()).send()
        })
        .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WooCommerceError::NotFound(path));
        }

        if !status.is_success() {
            tracing::error!(
                %status,
                path = %path,
                body = %preview(&body),
                "WooCommerce API returned non-success status"
            );
            return Err(WooCommerceError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %preview(&body),
                "Failed to parse WooCommerce response"
            );
            WooCommerceError::Parse(e)
        })
    }

    /// Fetch the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body is not a product array.
    #[instrument(skip(self), fields(site = %self.site_url()))]
    pub async fn list_products(&self) -> Result<Vec<WooProduct>, WooCommerceError> {
        let products: Vec<WooProduct> = self.get_json(&["products"]).await?;
        debug!(count = products.len(), "Fetched WooCommerce products");
        Ok(products)
    }

    /// Fetch the variations of one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn list_variations(
        &self,
        product_id: u64,
    ) -> Result<Vec<WooVariation>, WooCommerceError> {
        let id = product_id.to_string();
        self.get_json(&["products", &id, "variations"]).await
    }

    /// Fetch one product by remote id, resolved to a catalog [`Product`].
    ///
    /// Variation failures degrade to the synthetic default variant.
    ///
    /// # Errors
    ///
    /// Returns [`WooCommerceError::NotFound`] for unknown ids, or another
    /// error if the product request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: &str) -> Result<Product, WooCommerceError> {
        let product: WooProduct = self.get_json(&["products", product_id]).await?;
        Ok(convert_product(self.resolve_variations(product).await))
    }

    /// Fetch the full remote catalog with variations resolved.
    ///
    /// Variation lookups run concurrently. A failed lookup degrades that
    /// product to no variations rather than failing the whole fetch.
    ///
    /// # Errors
    ///
    /// Returns an error only if the product list itself cannot be fetched.
    #[instrument(skip(self), fields(site = %self.site_url()))]
    pub async fn fetch_catalog(&self) -> Result<Vec<RemoteProduct>, WooCommerceError> {
        let products = self.list_products().await?;
        let resolved = join_all(
            products
                .into_iter()
                .map(|product| self.resolve_variations(product)),
        )
        .await;
        Ok(resolved)
    }

    async fn resolve_variations(&self, product: WooProduct) -> RemoteProduct {
        if !product.has_variations() {
            return RemoteProduct::without_variations(product);
        }

        match self.list_variations(product.id).await {
            Ok(variations) => RemoteProduct {
                product,
                variations,
            },
            Err(e) => {
                warn!(
                    product_id = product.id,
                    error = %e,
                    "Failed to fetch variations, using default variant"
                );
                RemoteProduct::without_variations(product)
            }
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
