//! Resolves the products shown to customers.
//!
//! # Resolution
//!
//! 1. No remote settings stored: the local list, unchanged ([`CatalogOrigin::Unconfigured`]).
//! 2. Remote fetch succeeded with at least one product left after filtering:
//!    the remote products ([`CatalogOrigin::Remote`]), or local followed by
//!    remote in augment mode ([`CatalogOrigin::Augmented`]).
//! 3. Remote fetch failed, or left nothing after filtering: the local list
//!    ([`CatalogOrigin::Fallback`]). The failure is logged, never returned.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use griffin_core::{Product, Service};
use tracing::{debug, instrument, warn};

use super::demo::LocalCatalog;
use super::services::merge_services;
use crate::woocommerce::{
    RemoteProduct, RetryPolicy, WooCommerceClient, WooCommerceConfig, WooCommerceError,
    WooSettings, convert_product,
};

/// One catalog item, tagged by where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    Local(Product),
    Remote(RemoteProduct),
}

impl CatalogEntry {
    /// Adapt the entry to the canonical product shape.
    #[must_use]
    pub fn into_product(self) -> Product {
        match self {
            Self::Local(product) => product,
            Self::Remote(remote) => convert_product(remote),
        }
    }

    /// Catalog id of the entry, as it will appear on the product.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Local(product) => product.id.to_string(),
            Self::Remote(remote) => remote.product.id.to_string(),
        }
    }

    /// English title, used for keyword filtering.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Local(product) => &product.title,
            Self::Remote(remote) => &remote.product.name,
        }
    }
}

/// How remote products combine with the local list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Remote products replace the local list.
    #[default]
    Replace,
    /// Remote products are appended after the local list.
    Augment,
}

impl MergeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Augment => "augment",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown merge mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown catalog mode '{0}' (expected replace or augment)")]
pub struct UnknownMergeMode(pub String);

impl FromStr for MergeMode {
    type Err = UnknownMergeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "augment" => Ok(Self::Augment),
            other => Err(UnknownMergeMode(other.to_owned())),
        }
    }
}

/// Rules for combining remote and local products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPolicy {
    pub mode: MergeMode,
    /// Remote products whose title contains any of these (case-insensitive)
    /// are dropped.
    pub blocked_keywords: Vec<String>,
}

impl CatalogPolicy {
    #[must_use]
    pub fn new(mode: MergeMode, blocked_keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            mode,
            blocked_keywords: blocked_keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Whether `title` contains a blocked keyword.
    #[must_use]
    pub fn is_blocked(&self, title: &str) -> bool {
        if self.blocked_keywords.is_empty() {
            return false;
        }
        let title = title.to_lowercase();
        self.blocked_keywords
            .iter()
            .any(|keyword| title.contains(&keyword.to_lowercase()))
    }

    /// Combine a successful remote fetch with the local list.
    #[must_use]
    pub fn merge(&self, local: &[Product], remote: Vec<RemoteProduct>) -> Catalog {
        let fetched = remote.len();
        let mut remote: Vec<CatalogEntry> = remote
            .into_iter()
            .map(CatalogEntry::Remote)
            .filter(|entry| !self.is_blocked(entry.title()))
            .collect();

        if remote.len() < fetched {
            debug!(
                blocked = fetched - remote.len(),
                "Dropped remote products matching blocked keywords"
            );
        }

        if self.mode == MergeMode::Augment {
            remote.retain(|entry| {
                let id = entry.id();
                !local.iter().any(|p| p.id.as_str() == id)
            });
        }

        if remote.is_empty() {
            warn!(fetched, "Remote catalog has no usable products, using local catalog");
            return Catalog::local(local, CatalogOrigin::Fallback);
        }

        match self.mode {
            MergeMode::Replace => Catalog {
                products: remote.into_iter().map(CatalogEntry::into_product).collect(),
                origin: CatalogOrigin::Remote,
            },
            MergeMode::Augment => Catalog {
                products: local
                    .iter()
                    .cloned()
                    .map(CatalogEntry::Local)
                    .chain(remote)
                    .map(CatalogEntry::into_product)
                    .collect(),
                origin: CatalogOrigin::Augmented,
            },
        }
    }
}

/// Where a resolved catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// No remote catalog configured.
    Unconfigured,
    /// Remote products only.
    Remote,
    /// Local products followed by remote products.
    Augmented,
    /// Remote catalog configured but unusable.
    Fallback,
}

impl CatalogOrigin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Remote => "remote",
            Self::Augmented => "augmented",
            Self::Fallback => "fallback",
        }
    }

    /// Whether the products include remote data.
    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Remote | Self::Augmented)
    }
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub origin: CatalogOrigin,
}

impl Catalog {
    fn local(products: &[Product], origin: CatalogOrigin) -> Self {
        Self {
            products: products.to_vec(),
            origin,
        }
    }
}

/// A resolved list of service cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    pub services: Vec<Service>,
    pub origin: CatalogOrigin,
}

impl ServiceCatalog {
    fn local(services: &[Service], origin: CatalogOrigin) -> Self {
        Self {
            services: services.to_vec(),
            origin,
        }
    }
}

/// Resolves the catalog from local data and the optional remote store.
#[derive(Clone)]
pub struct CatalogAggregator {
    inner: Arc<AggregatorInner>,
}

struct AggregatorInner {
    local: LocalCatalog,
    settings: WooSettings,
    policy: CatalogPolicy,
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl CatalogAggregator {
    #[must_use]
    pub fn new(local: LocalCatalog, settings: WooSettings, policy: CatalogPolicy) -> Self {
        Self::with_http_client(
            local,
            settings,
            policy,
            reqwest::Client::new(),
            RetryPolicy::default(),
        )
    }

    #[must_use]
    pub fn with_http_client(
        local: LocalCatalog,
        settings: WooSettings,
        policy: CatalogPolicy,
        http: reqwest::Client,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(AggregatorInner {
                local,
                settings,
                policy,
                http,
                retry,
            }),
        }
    }

    #[must_use]
    pub fn local(&self) -> &LocalCatalog {
        &self.inner.local
    }

    #[must_use]
    pub fn policy(&self) -> &CatalogPolicy {
        &self.inner.policy
    }

    #[must_use]
    pub fn settings(&self) -> &WooSettings {
        &self.inner.settings
    }

    /// A client for the stored remote settings, if any.
    #[must_use]
    pub fn client(&self) -> Option<WooCommerceClient> {
        self.inner.settings.load().map(|config| self.client_for(config))
    }

    fn client_for(&self, config: WooCommerceConfig) -> WooCommerceClient {
        WooCommerceClient::with_http_client(self.inner.http.clone(), config, self.inner.retry)
    }

    /// Fetch the remote catalog. `Ok(None)` means none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote product list cannot be fetched.
    pub async fn fetch_remote(&self) -> Result<Option<Vec<RemoteProduct>>, WooCommerceError> {
        self.fetch_from(self.inner.settings.load()).await
    }

    async fn fetch_from(
        &self,
        config: Option<WooCommerceConfig>,
    ) -> Result<Option<Vec<RemoteProduct>>, WooCommerceError> {
        match config {
            Some(config) => self.client_for(config).fetch_catalog().await.map(Some),
            None => Ok(None),
        }
    }

    /// Resolve the products to display from the stored settings. Never fails.
    pub async fn resolve(&self) -> Catalog {
        self.resolve_with(self.inner.settings.load()).await
    }

    /// Resolve the products to display from `config`. Never fails.
    #[instrument(skip_all, fields(mode = %self.inner.policy.mode))]
    pub async fn resolve_with(&self, config: Option<WooCommerceConfig>) -> Catalog {
        let local = &self.inner.local.products;
        match self.fetch_from(config).await {
            Ok(None) => Catalog::local(local, CatalogOrigin::Unconfigured),
            Ok(Some(remote)) => self.inner.policy.merge(local, remote),
            Err(e) => {
                warn!(error = %e, "Failed to fetch remote catalog, using local catalog");
                Catalog::local(local, CatalogOrigin::Fallback)
            }
        }
    }

    /// Local service cards followed by remote products presented as services.
    ///
    /// Remote titles matching a blocked keyword are skipped. Fetch failures
    /// yield the local services only.
    pub async fn resolve_services(&self) -> ServiceCatalog {
        self.resolve_services_with(self.inner.settings.load()).await
    }

    /// [`Self::resolve_services`] against `config` instead of the stored settings.
    #[instrument(skip_all)]
    pub async fn resolve_services_with(
        &self,
        config: Option<WooCommerceConfig>,
    ) -> ServiceCatalog {
        let local = &self.inner.local.services;
        match self.fetch_from(config).await {
            Ok(None) => ServiceCatalog::local(local, CatalogOrigin::Unconfigured),
            Ok(Some(mut remote)) => {
                remote.retain(|item| !self.inner.policy.is_blocked(&item.product.name));
                if remote.is_empty() {
                    return ServiceCatalog::local(local, CatalogOrigin::Fallback);
                }
                ServiceCatalog {
                    services: merge_services(local, &remote),
                    origin: CatalogOrigin::Augmented,
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch remote services, using local services");
                ServiceCatalog::local(local, CatalogOrigin::Fallback)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use griffin_core::ProductId;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::woocommerce::WooCommerceConfig;
    use crate::woocommerce::types::WooProduct;

    fn remote(id: u64, name: &str) -> RemoteProduct {
        RemoteProduct::without_variations(WooProduct {
            id,
            name: name.to_owned(),
            price: "100".to_owned(),
            ..WooProduct::default()
        })
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_merge_mode_parse() {
        assert_eq!("replace".parse::<MergeMode>().unwrap(), MergeMode::Replace);
        assert_eq!(" Augment ".parse::<MergeMode>().unwrap(), MergeMode::Augment);
        assert!("merge".parse::<MergeMode>().is_err());
    }

    #[test]
    fn test_policy_normalizes_keywords() {
        let policy = CatalogPolicy::new(
            MergeMode::Replace,
            vec![" Gift ".to_owned(), String::new(), "SAMPLE".to_owned()],
        );
        assert_eq!(policy.blocked_keywords, vec!["gift", "sample"]);
        assert!(policy.is_blocked("Holiday GIFT card"));
        assert!(!policy.is_blocked("Firewall"));
    }

    #[test]
    fn test_replace_uses_remote_only() {
        let local = LocalCatalog::demo().products;
        let catalog = CatalogPolicy::default().merge(&local, vec![remote(10, "A"), remote(11, "B")]);
        assert_eq!(catalog.origin, CatalogOrigin::Remote);
        assert_eq!(ids(&catalog), vec!["10", "11"]);
    }

    #[test]
    fn test_blocked_keywords_filter_remote() {
        let local = LocalCatalog::demo().products;
        let policy = CatalogPolicy::new(MergeMode::Replace, vec!["hoodie".to_owned()]);
        let catalog = policy.merge(
            &local,
            vec![remote(10, "Logo Hoodie"), remote(11, "Managed Firewall")],
        );
        assert_eq!(ids(&catalog), vec!["11"]);
    }

    #[test]
    fn test_everything_blocked_falls_back() {
        let local = LocalCatalog::demo().products;
        let policy = CatalogPolicy::new(MergeMode::Replace, vec!["hoodie".to_owned()]);
        let catalog = policy.merge(&local, vec![remote(10, "Logo HOODIE")]);
        assert_eq!(catalog.origin, CatalogOrigin::Fallback);
        assert_eq!(catalog.products, local);
    }

    #[test]
    fn test_empty_remote_falls_back() {
        let local = LocalCatalog::demo().products;
        let catalog = CatalogPolicy::default().merge(&local, Vec::new());
        assert_eq!(catalog.origin, CatalogOrigin::Fallback);
        assert_eq!(catalog.products, local);
    }

    #[test]
    fn test_augment_appends_and_skips_colliding_ids() {
        let local = LocalCatalog::demo().products;
        let policy = CatalogPolicy::new(MergeMode::Augment, Vec::new());
        let catalog = policy.merge(&local, vec![remote(1, "Clash"), remote(42, "New")]);

        assert_eq!(catalog.origin, CatalogOrigin::Augmented);
        assert_eq!(ids(&catalog), vec!["1", "2", "3", "4", "5", "42"]);
        assert_eq!(catalog.products[0], local[0]);
    }

    #[test]
    fn test_entry_adapters() {
        let local = LocalCatalog::demo().products.remove(0);
        assert_eq!(CatalogEntry::Local(local.clone()).into_product(), local);

        let product = CatalogEntry::Remote(remote(9, "Remote")).into_product();
        assert_eq!(product.id, ProductId::new("9"));
        assert_eq!(product.title_ar, "Remote");
    }

    #[tokio::test]
    async fn test_unconfigured_returns_local_unchanged() {
        let settings = WooSettings::new(Arc::new(MemoryStore::new()));
        let aggregator =
            CatalogAggregator::new(LocalCatalog::demo(), settings, CatalogPolicy::default());

        let catalog = aggregator.resolve().await;
        assert_eq!(catalog.origin, CatalogOrigin::Unconfigured);
        assert_eq!(catalog.products, LocalCatalog::demo().products);
        let services = aggregator.resolve_services().await;
        assert_eq!(services.origin, CatalogOrigin::Unconfigured);
        assert_eq!(services.services, LocalCatalog::demo().services);
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back() {
        let settings = WooSettings::new(Arc::new(MemoryStore::new()));
        let config = WooCommerceConfig::parse(
            "http://127.0.0.1:1",
            "ck_4f9a1c0d7e2b8a6f3c5d9e1b7a2f4c8d0e6b3a91",
            "cs_9b2e7d4a1f6c8e3b0a5d7f2c9e4b1a6d8f3c0e72",
        )
        .unwrap();
        settings.save(&config).unwrap();

        let aggregator = CatalogAggregator::with_http_client(
            LocalCatalog::demo(),
            settings,
            CatalogPolicy::default(),
            reqwest::Client::new(),
            RetryPolicy::none(),
        );

        let catalog = aggregator.resolve().await;
        assert_eq!(catalog.origin, CatalogOrigin::Fallback);
        assert_eq!(catalog.products, LocalCatalog::demo().products);
        assert_eq!(
            aggregator.resolve_services().await.origin,
            CatalogOrigin::Fallback
        );
    }
}
