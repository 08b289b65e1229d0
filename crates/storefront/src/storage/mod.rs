//! On-device key-value persistence.
//!
//! # Records
//!
//! Each record is a JSON document stored under a fixed key. Keys are scoped
//! to one storefront installation (one data directory, or one in-memory
//! store):
//!
//! - [`keys::CART_ITEMS`] - JSON array of cart rows
//! - [`keys::PRODUCTS`] - JSON array of admin-managed products
//! - [`keys::WOO_CONFIG`] - remote catalog connection settings
//!
//! Records carry no schema version. Readers decide how to treat a payload
//! that no longer parses; the stores in this crate treat it as absent.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used by tests and ephemeral runs
//! - [`FileStore`] - one `<key>.json` file per key in a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Fixed storage keys.
pub mod keys {
    /// Cart rows.
    pub const CART_ITEMS: &str = "griffin_cart_items";
    /// Admin-managed product collection.
    pub const PRODUCTS: &str = "griffin_products";
    /// Remote catalog connection settings.
    pub const WOO_CONFIG: &str = "griffin_woo_config";
}

/// Errors that can occur when reading or writing a record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored payload is not valid JSON for the expected record.
    #[error("malformed record under {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a record failed.
    #[error("failed to serialize record for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The key cannot be mapped onto the backing medium.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Synchronous string key-value storage.
///
/// Mirrors the semantics of browser local storage: values are whole
/// strings, writes replace the previous value, and removing an absent key
/// is not an error.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and deserialize the record under `key`.
///
/// Returns `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns [`StorageError::Parse`] when the payload does not deserialize, or
/// the backend's error when the read itself fails.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Parse {
            key: key.to_owned(),
            source,
        })
}

/// Serialize `value` and store it under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}

/// Read a collection record, treating absent and unreadable payloads as empty.
///
/// Failures are logged and swallowed.
pub fn read_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    match read_json::<Vec<T>>(store, key) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable record");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_absent() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = read_json(&store, "missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read_json() {
        let store = MemoryStore::new();
        write_json(&store, "numbers", &[1, 2, 3]).unwrap();
        let value: Option<Vec<u32>> = read_json(&store, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_read_json_malformed() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = read_json(&store, "numbers");
        assert!(matches!(result, Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_read_collection_swallows_malformed() {
        let store = MemoryStore::new();
        store.set("numbers", "[1, 2, \"three\"]").unwrap();
        let items: Vec<u32> = read_collection(&store, "numbers");
        assert!(items.is_empty());
    }
}
