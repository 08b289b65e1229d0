//! Remote catalog connection settings.
//!
//! Settings are entered by the store operator and persisted under
//! [`keys::WOO_CONFIG`] as `{ siteUrl, consumerKey, consumerSecret }`. No
//! record means the remote catalog is not configured.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::config::{MIN_ENTROPY_BITS_PER_CHAR, placeholder_pattern, shannon_entropy};
use crate::storage::{KeyValueStore, StorageError, keys, read_json, write_json};

/// Errors raised while validating connection settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A required field was left blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The site URL is not an absolute http(s) URL.
    #[error("invalid site URL: {0}")]
    InvalidSiteUrl(String),

    /// A credential looks like a template value rather than a real key.
    #[error("{field} appears to be a placeholder (contains '{pattern}')")]
    Placeholder {
        field: &'static str,
        pattern: &'static str,
    },

    /// A credential is too repetitive to be a generated key.
    #[error("{field} does not look like a generated API key")]
    WeakCredential { field: &'static str },
}

/// Connection settings for a WooCommerce store.
///
/// Implements `Debug` manually to redact credentials.
#[derive(Clone)]
pub struct WooCommerceConfig {
    /// Root of the WordPress site (e.g. `https://shop.example.com`).
    pub site_url: Url,
    /// REST API consumer key (`ck_...`).
    pub consumer_key: SecretString,
    /// REST API consumer secret (`cs_...`).
    pub consumer_secret: SecretString,
}

impl std::fmt::Debug for WooCommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceConfig")
            .field("site_url", &self.site_url.as_str())
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

impl WooCommerceConfig {
    /// Validate operator input and build a config.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is blank, the site URL is not http(s), or
    /// a credential is an obvious placeholder such as `ck_xxxx`.
    pub fn parse(
        site_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Result<Self, SettingsError> {
        let site_url = site_url.trim();
        let consumer_key = consumer_key.trim();
        let consumer_secret = consumer_secret.trim();

        if site_url.is_empty() {
            return Err(SettingsError::MissingField("siteUrl"));
        }
        if consumer_key.is_empty() {
            return Err(SettingsError::MissingField("consumerKey"));
        }
        if consumer_secret.is_empty() {
            return Err(SettingsError::MissingField("consumerSecret"));
        }

        let site_url = parse_site_url(site_url)?;

        for (field, value) in [
            ("consumerKey", consumer_key),
            ("consumerSecret", consumer_secret),
        ] {
            if let Some(pattern) = placeholder_pattern(value) {
                return Err(SettingsError::Placeholder { field, pattern });
            }
            if shannon_entropy(value) < MIN_ENTROPY_BITS_PER_CHAR {
                return Err(SettingsError::WeakCredential { field });
            }
        }

        Ok(Self {
            site_url,
            consumer_key: SecretString::from(consumer_key),
            consumer_secret: SecretString::from(consumer_secret),
        })
    }
}

fn parse_site_url(raw: &str) -> Result<Url, SettingsError> {
    let url = Url::parse(raw).map_err(|e| SettingsError::InvalidSiteUrl(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(SettingsError::InvalidSiteUrl(format!(
            "{raw} is not an http(s) URL"
        )));
    }
    Ok(url)
}

/// Persisted shape of [`WooCommerceConfig`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWooConfig {
    site_url: String,
    consumer_key: String,
    consumer_secret: String,
}

/// Reads and writes the persisted connection settings.
#[derive(Clone)]
pub struct WooSettings {
    store: Arc<dyn KeyValueStore>,
}

impl WooSettings {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored settings, or `None` when the remote catalog is not configured.
    ///
    /// Unreadable records are logged and treated as not configured.
    #[must_use]
    pub fn load(&self) -> Option<WooCommerceConfig> {
        let stored = match read_json::<StoredWooConfig>(self.store.as_ref(), keys::WOO_CONFIG) {
            Ok(stored) => stored?,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable WooCommerce settings");
                return None;
            }
        };

        match parse_site_url(&stored.site_url) {
            Ok(site_url) => Some(WooCommerceConfig {
                site_url,
                consumer_key: SecretString::from(stored.consumer_key),
                consumer_secret: SecretString::from(stored.consumer_secret),
            }),
            Err(e) => {
                warn!(error = %e, "Ignoring WooCommerce settings with invalid site URL");
                None
            }
        }
    }

    /// Whether a remote catalog is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.load().is_some()
    }

    /// Persist `config`, replacing any previous settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn save(&self, config: &WooCommerceConfig) -> Result<(), StorageError> {
        let stored = StoredWooConfig {
            site_url: config.site_url.to_string(),
            consumer_key: config.consumer_key.expose_secret().to_owned(),
            consumer_secret: config.consumer_secret.expose_secret().to_owned(),
        };
        write_json(self.store.as_ref(), keys::WOO_CONFIG, &stored)
    }

    /// Remove the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(keys::WOO_CONFIG)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "ck_4f9a1c0d7e2b8a6f3c5d9e1b7a2f4c8d0e6b3a91";
    const SECRET: &str = "cs_9b2e7d4a1f6c8e3b0a5d7f2c9e4b1a6d8f3c0e72";

    #[test]
    fn test_parse_valid() {
        let config = WooCommerceConfig::parse("https://shop.example.com", KEY, SECRET).unwrap();
        assert_eq!(config.site_url.host_str(), Some("shop.example.com"));
        assert_eq!(config.consumer_key.expose_secret(), KEY);
    }

    #[test]
    fn test_parse_missing_fields() {
        assert_eq!(
            WooCommerceConfig::parse("", KEY, SECRET).unwrap_err(),
            SettingsError::MissingField("siteUrl")
        );
        assert_eq!(
            WooCommerceConfig::parse("https://shop.example.com", " ", SECRET).unwrap_err(),
            SettingsError::MissingField("consumerKey")
        );
        assert_eq!(
            WooCommerceConfig::parse("https://shop.example.com", KEY, "").unwrap_err(),
            SettingsError::MissingField("consumerSecret")
        );
    }

    #[test]
    fn test_parse_rejects_non_http_url() {
        assert!(matches!(
            WooCommerceConfig::parse("ftp://shop.example.com", KEY, SECRET),
            Err(SettingsError::InvalidSiteUrl(_))
        ));
        assert!(matches!(
            WooCommerceConfig::parse("shop.example.com", KEY, SECRET),
            Err(SettingsError::InvalidSiteUrl(_))
        ));
    }

    #[test]
    fn test_parse_rejects_placeholder_keys() {
        let err = WooCommerceConfig::parse(
            "https://shop.example.com",
            "ck_xxxxxxxxxxxxxxxxxxxxxxxxxxxx",
            SECRET,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Placeholder {
                field: "consumerKey",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_low_entropy_keys() {
        let err = WooCommerceConfig::parse("https://shop.example.com", KEY, "cs_aaaaaaaaaaaaaaaa")
            .unwrap_err();
        assert_eq!(
            err,
            SettingsError::WeakCredential {
                field: "consumerSecret"
            }
        );
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = WooCommerceConfig::parse("https://shop.example.com", KEY, SECRET).unwrap();
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("shop.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(KEY));
        assert!(!debug_output.contains(SECRET));
    }

    #[test]
    fn test_save_load_clear() {
        let store = Arc::new(MemoryStore::new());
        let settings = WooSettings::new(store.clone());
        assert!(settings.load().is_none());

        let config = WooCommerceConfig::parse("https://shop.example.com", KEY, SECRET).unwrap();
        settings.save(&config).unwrap();

        let raw = store.get(keys::WOO_CONFIG).unwrap().unwrap();
        assert!(raw.contains("\"siteUrl\""));
        assert!(raw.contains("\"consumerKey\""));
        assert!(raw.contains("\"consumerSecret\""));

        let loaded = settings.load().unwrap();
        assert_eq!(loaded.site_url, config.site_url);
        assert_eq!(loaded.consumer_secret.expose_secret(), SECRET);
        assert!(settings.is_configured());

        settings.clear().unwrap();
        assert!(settings.load().is_none());
    }

    #[test]
    fn test_load_malformed_is_unconfigured() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::WOO_CONFIG, "not json").unwrap();
        assert!(WooSettings::new(store.clone()).load().is_none());

        store
            .set(
                keys::WOO_CONFIG,
                r#"{"siteUrl": "nope", "consumerKey": "a", "consumerSecret": "b"}"#,
            )
            .unwrap();
        assert!(WooSettings::new(store).load().is_none());
    }
}
