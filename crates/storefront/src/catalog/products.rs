//! Admin-managed product collection.

use std::sync::Arc;

use griffin_core::{Product, ProductId};
use tracing::{debug, info};

use super::demo::seed_products;
use crate::storage::{KeyValueStore, StorageError, keys, read_collection, write_json};

/// Number of products returned by [`ProductStore::featured`] when no limit
/// is given.
pub const DEFAULT_FEATURED_LIMIT: usize = 4;

/// Product collection persisted under [`keys::PRODUCTS`], upserted by id.
#[derive(Clone)]
pub struct ProductStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProductStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Seed the demo products if the collection is empty.
    ///
    /// Returns `true` when it wrote the seed set.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed set cannot be written.
    pub fn initialize(&self) -> Result<bool, StorageError> {
        if !self.list().is_empty() {
            return Ok(false);
        }
        let seeds = seed_products();
        info!(count = seeds.len(), "Seeding demo products");
        self.persist(&seeds)?;
        Ok(true)
    }

    /// All products, in insertion order. Absent or malformed records read as empty.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        read_collection(self.store.as_ref(), keys::PRODUCTS)
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.list().into_iter().find(|p| &p.id == id)
    }

    /// Insert `product`, or replace the existing product with the same id
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written.
    pub fn save(&self, product: Product) -> Result<Vec<Product>, StorageError> {
        let mut products = self.list();
        if let Some(existing) = products.iter_mut().find(|p| p.id == product.id) {
            debug!(product_id = %product.id, "Replacing product");
            *existing = product;
        } else {
            debug!(product_id = %product.id, "Adding product");
            products.push(product);
        }
        self.persist(&products)?;
        Ok(products)
    }

    /// Delete a product. Returns `false` (and writes nothing) if it was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written.
    pub fn delete(&self, id: &ProductId) -> Result<bool, StorageError> {
        let mut products = self.list();
        let before = products.len();
        products.retain(|p| &p.id != id);
        if products.len() == before {
            return Ok(false);
        }
        self.persist(&products)?;
        Ok(true)
    }

    /// The first `limit` products (default [`DEFAULT_FEATURED_LIMIT`]).
    #[must_use]
    pub fn featured(&self, limit: Option<usize>) -> Vec<Product> {
        let mut products = self.list();
        products.truncate(limit.unwrap_or(DEFAULT_FEATURED_LIMIT));
        products
    }

    fn persist(&self, products: &[Product]) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), keys::PRODUCTS, products)
    }
}
