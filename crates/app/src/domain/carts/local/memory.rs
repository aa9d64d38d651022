//! In-memory cart storage.

use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

use boxcart::items::CartLineItem;

use super::{LocalCartStore, StoreError};

/// Cart storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    carts: RwLock<FxHashMap<String, Vec<CartLineItem>>>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `items` already saved under `key`.
    #[must_use]
    pub fn with_cart(key: &str, items: Vec<CartLineItem>) -> Self {
        let store = Self::default();

        store
            .carts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), items);

        store
    }
}

impl LocalCartStore for MemoryCartStore {
    fn get(&self, key: &str) -> Result<Option<Vec<CartLineItem>>, StoreError> {
        Ok(self
            .carts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, items: &[CartLineItem]) -> Result<(), StoreError> {
        self.carts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), items.to_vec());

        Ok(())
    }
}
