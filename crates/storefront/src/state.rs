//! Storefront state shared by every entry point.

use std::sync::Arc;

use tracing::info;

use crate::cart::CartStore;
use crate::catalog::{CachedCatalog, CatalogAggregator, LocalCatalog, ProductStore};
use crate::checkout::CheckoutService;
use crate::config::StorefrontConfig;
use crate::storage::{FileStore, KeyValueStore, StorageError};
use crate::woocommerce::{WooCommerceConfig, WooSettings};

/// The storefront's stores and services, built once at start-up.
///
/// This struct is cheaply cloneable via `Arc`. Nothing is seeded on
/// construction; call [`Storefront::initialize`] once after building it.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    cart: CartStore,
    products: ProductStore,
    settings: WooSettings,
    catalog: CachedCatalog,
    checkout: CheckoutService,
}

impl Storefront {
    /// Build a storefront over the data directory named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self, StorageError> {
        let store = FileStore::open(config.data_dir.clone())?;
        Ok(Self::with_store(config, Arc::new(store), LocalCatalog::demo()))
    }

    /// Build a storefront over any store and local catalog.
    #[must_use]
    pub fn with_store(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
        local: LocalCatalog,
    ) -> Self {
        let aggregator = CatalogAggregator::new(
            local,
            WooSettings::new(store.clone()),
            config.catalog.clone(),
        );
        Self::with_aggregator(config, store, aggregator)
    }

    /// Build a storefront around a preconfigured aggregator.
    ///
    /// The aggregator must read its settings from the same `store`.
    #[must_use]
    pub fn with_aggregator(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
        aggregator: CatalogAggregator,
    ) -> Self {
        let cart = CartStore::new(store.clone());
        let checkout = CheckoutService::new(cart.clone(), config.checkout_delay);
        let catalog = CachedCatalog::new(aggregator, config.catalog_ttl);

        Self {
            inner: Arc::new(StorefrontInner {
                products: ProductStore::new(store.clone()),
                settings: WooSettings::new(store),
                cart,
                catalog,
                checkout,
                config,
            }),
        }
    }

    /// Seed first-run data.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed products cannot be written.
    pub fn initialize(&self) -> Result<(), StorageError> {
        if self.inner.products.initialize()? {
            info!("Initialized product collection with demo products");
        }
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    #[must_use]
    pub fn catalog(&self) -> &CachedCatalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }

    #[must_use]
    pub fn woo_settings(&self) -> &WooSettings {
        &self.inner.settings
    }

    /// Store new remote catalog settings and drop cached results.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn configure_remote(&self, config: &WooCommerceConfig) -> Result<(), StorageError> {
        self.inner.settings.save(config)?;
        self.inner.catalog.invalidate();
        info!(site = %config.site_url, "Remote catalog configured");
        Ok(())
    }

    /// Remove the remote catalog settings and drop cached results.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be removed.
    pub fn disconnect_remote(&self) -> Result<(), StorageError> {
        self.inner.settings.clear()?;
        self.inner.catalog.invalidate();
        info!("Remote catalog disconnected");
        Ok(())
    }
}
