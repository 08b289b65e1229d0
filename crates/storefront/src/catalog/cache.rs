//! Request cache in front of [`CatalogAggregator`].
//!
//! Only catalogs that include remote data are cached, so a transient
//! failure is retried on the next read instead of pinning the fallback for
//! the whole TTL.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use super::aggregator::{Catalog, CatalogAggregator, ServiceCatalog};
use crate::woocommerce::WooCommerceConfig;

/// Default freshness window for a resolved catalog.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(300);

/// Cache key, scoped by the remote site so a settings change never serves
/// another store's products.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products { site: String },
    Services { site: String },
}

#[derive(Debug, Clone)]
enum CacheValue {
    Products(Catalog),
    Services(ServiceCatalog),
}

fn site_of(config: Option<&WooCommerceConfig>) -> String {
    config.map_or_else(|| "local".to_owned(), |config| config.site_url.to_string())
}

/// [`CatalogAggregator`] with resolved results kept fresh for a fixed TTL.
#[derive(Clone)]
pub struct CachedCatalog {
    aggregator: CatalogAggregator,
    cache: Cache<CacheKey, CacheValue>,
}

impl CachedCatalog {
    #[must_use]
    pub fn new(aggregator: CatalogAggregator, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(16).time_to_live(ttl).build();
        Self { aggregator, cache }
    }

    #[must_use]
    pub fn aggregator(&self) -> &CatalogAggregator {
        &self.aggregator
    }

    /// Resolved products, served from cache while fresh.
    ///
    /// The settings are read once; the same config keys the cache and drives
    /// the fetch. Concurrent misses for one key share a single fetch.
    pub async fn products(&self) -> Catalog {
        let config = self.aggregator.settings().load();
        let key = CacheKey::Products {
            site: site_of(config.as_ref()),
        };
        let aggregator = self.aggregator.clone();
        let resolved = self
            .cache
            .try_get_with(key, async move {
                debug!("Catalog cache miss");
                let catalog = aggregator.resolve_with(config).await;
                if catalog.origin.is_remote() {
                    Ok(CacheValue::Products(catalog))
                } else {
                    Err(catalog)
                }
            })
            .await;

        match resolved {
            Ok(CacheValue::Products(catalog)) => catalog,
            Ok(CacheValue::Services(_)) => self.aggregator.resolve().await,
            Err(uncached) => Catalog::clone(&uncached),
        }
    }

    /// Resolved service cards, served from cache while fresh.
    pub async fn services(&self) -> ServiceCatalog {
        let config = self.aggregator.settings().load();
        let key = CacheKey::Services {
            site: site_of(config.as_ref()),
        };
        let aggregator = self.aggregator.clone();
        let resolved = self
            .cache
            .try_get_with(key, async move {
                debug!("Services cache miss");
                let services = aggregator.resolve_services_with(config).await;
                if services.origin.is_remote() {
                    Ok(CacheValue::Services(services))
                } else {
                    Err(services)
                }
            })
            .await;

        match resolved {
            Ok(CacheValue::Services(services)) => services,
            Ok(CacheValue::Products(_)) => self.aggregator.resolve_services().await,
            Err(uncached) => ServiceCatalog::clone(&uncached),
        }
    }

    /// Drop every cached result, e.g. after the remote settings change.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}
