//! Integration tests for the Griffin storefront.
//!
//! Every test runs against a [`Storefront`] persisted to its own temporary
//! directory. Remote catalog tests point the storefront at a `wiremock`
//! server standing in for a WooCommerce store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p griffin-integration-tests
//! ```

use std::sync::Arc;
use std::time::Duration;

use griffin_storefront::Storefront;
use griffin_storefront::catalog::{CatalogAggregator, CatalogPolicy, LocalCatalog};
use griffin_storefront::config::StorefrontConfig;
use griffin_storefront::storage::FileStore;
use griffin_storefront::woocommerce::{RetryPolicy, WooCommerceConfig, WooSettings};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Consumer key accepted by [`WooCommerceConfig::parse`].
pub const CONSUMER_KEY: &str = "ck_4f9a1c0d7e2b8a6f3c5d9e1b7a2f4c8d0e6b3a91";

/// Consumer secret accepted by [`WooCommerceConfig::parse`].
pub const CONSUMER_SECRET: &str = "cs_9b2e7d4a1f6c8e3b0a5d7f2c9e4b1a6d8f3c0e72";

/// Path of the product list endpoint on the mock store.
pub const PRODUCTS_PATH: &str = "/wp-json/wc/v3/products";

/// A storefront over a throwaway data directory.
pub struct TestContext {
    pub storefront: Storefront,
    pub dir: TempDir,
}

impl TestContext {
    /// Storefront with the default catalog policy.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(CatalogPolicy::default())
    }

    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn with_policy(policy: CatalogPolicy) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storefront = open(&dir, policy);
        Self { storefront, dir }
    }

    /// A second storefront over the same data directory, as after a restart.
    #[must_use]
    pub fn reopen(&self) -> Storefront {
        open(&self.dir, self.storefront.config().catalog.clone())
    }

    /// Store credentials pointing at `server`.
    ///
    /// # Panics
    ///
    /// Panics if the settings cannot be saved.
    pub fn connect(&self, server: &MockServer) {
        let config = WooCommerceConfig::parse(&server.uri(), CONSUMER_KEY, CONSUMER_SECRET)
            .expect("valid mock store config");
        self.storefront
            .configure_remote(&config)
            .expect("save remote settings");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn open(dir: &TempDir, policy: CatalogPolicy) -> Storefront {
    let config = StorefrontConfig {
        data_dir: dir.path().to_path_buf(),
        catalog: policy.clone(),
        checkout_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    };
    let store = Arc::new(FileStore::open(dir.path()).expect("open file store"));
    let aggregator = CatalogAggregator::with_http_client(
        LocalCatalog::demo(),
        WooSettings::new(store.clone()),
        policy,
        reqwest::Client::new(),
        RetryPolicy::none(),
    );
    Storefront::with_aggregator(config, store, aggregator)
}

/// A WooCommerce product listing entry.
#[must_use]
pub fn woo_product(id: u64, name: &str, price: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "short_description": format!("{name} for small offices"),
        "description": "Fast setup. Remote support. Annual updates.",
        "images": [{"src": format!("https://cdn.example.net/{id}.png"), "alt": name}],
        "categories": [{"id": 1, "name": "Networking"}],
    })
}

/// Serve `products` from the product list endpoint.
pub async fn mount_products(server: &MockServer, products: Value) {
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products))
        .mount(server)
        .await;
}
