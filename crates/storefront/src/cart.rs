//! Shopping cart persisted in the local key-value store.
//!
//! Every operation reads the whole collection, mutates a copy, and writes
//! the whole collection back. There is no locking across calls: two
//! interleaved writers resolve as last-write-wins, which is acceptable for a
//! cart owned by a single customer session.

use std::sync::Arc;

use chrono::Utc;
use griffin_core::{CartItem, CartItemId, Price, Product, ProductVariant};
use tracing::debug;

use crate::storage::{KeyValueStore, StorageError, keys, read_collection, write_json};

/// Cart contents plus the aggregates shown in the header badge and drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    /// Sum of quantities across all rows.
    pub count: u32,
    /// Sum of `price * quantity` across all rows.
    pub total: Price,
}

impl CartSummary {
    fn from_items(items: Vec<CartItem>) -> Self {
        let count = count_of(&items);
        let total = total_of(&items);
        Self {
            items,
            count,
            total,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The only owner of the persisted cart record.
#[derive(Clone)]
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
}

impl CartStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current cart rows.
    ///
    /// An absent or unreadable record is an empty cart.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        read_collection(self.store.as_ref(), keys::CART_ITEMS)
    }

    /// Look up a single row.
    #[must_use]
    pub fn find(&self, item_id: &CartItemId) -> Option<CartItem> {
        self.items().into_iter().find(|item| &item.id == item_id)
    }

    /// Add `quantity` of `variant` to the cart.
    ///
    /// If a row for the same product/variant pairing exists its quantity is
    /// incremented; otherwise a new row is appended with display fields copied
    /// from `product` and `variant`. A quantity of zero adds one.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be written.
    pub fn add(
        &self,
        product: &Product,
        variant: &ProductVariant,
        quantity: u32,
    ) -> Result<Vec<CartItem>, StorageError> {
        let quantity = quantity.max(1);
        let mut items = self.items();

        if let Some(existing) = items
            .iter_mut()
            .find(|item| item.matches(&product.id, &variant.id))
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            debug!(item_id = %existing.id, quantity = existing.quantity, "Incremented cart row");
        } else {
            let id = next_item_id(&items);
            debug!(item_id = %id, product_id = %product.id, variant_id = %variant.id, "Added cart row");
            items.push(CartItem::new(id, product, variant, quantity));
        }

        self.persist(&items)?;
        Ok(items)
    }

    /// Remove the row with `item_id`.
    ///
    /// Removing an id that is not in the cart returns the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be written.
    pub fn remove(&self, item_id: &CartItemId) -> Result<Vec<CartItem>, StorageError> {
        let mut items = self.items();
        let before = items.len();
        items.retain(|item| &item.id != item_id);

        if items.len() != before {
            self.persist(&items)?;
        }
        Ok(items)
    }

    /// Overwrite the quantity of the row with `item_id`.
    ///
    /// A quantity of zero removes the row. Unknown ids leave the cart
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be written.
    pub fn update_quantity(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<Vec<CartItem>, StorageError> {
        if quantity == 0 {
            return self.remove(item_id);
        }

        let mut items = self.items();
        let Some(item) = items.iter_mut().find(|item| &item.id == item_id) else {
            return Ok(items);
        };
        item.quantity = quantity;

        self.persist(&items)?;
        Ok(items)
    }

    /// Delete the cart record entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed.
    pub fn clear(&self) -> Result<Vec<CartItem>, StorageError> {
        self.store.remove(keys::CART_ITEMS)?;
        Ok(Vec::new())
    }

    /// Sum of `price * quantity` across all rows.
    #[must_use]
    pub fn total(&self) -> Price {
        total_of(&self.items())
    }

    /// Sum of quantities across all rows.
    #[must_use]
    pub fn count(&self) -> u32 {
        count_of(&self.items())
    }

    /// Rows, count, and total from a single read.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(self.items())
    }

    fn persist(&self, items: &[CartItem]) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), keys::CART_ITEMS, items)
    }
}

fn total_of(items: &[CartItem]) -> Price {
    items.iter().map(CartItem::line_total).sum()
}

fn count_of(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
}

/// Millisecond timestamp, bumped past any id already in the cart.
fn next_item_id(items: &[CartItem]) -> CartItemId {
    let mut stamp = Utc::now().timestamp_millis();
    while items.iter().any(|item| item.id.as_str() == stamp.to_string()) {
        stamp += 1;
    }
    CartItemId::new(stamp.to_string())
}
