//! Local cart storage
//!
//! The device keeps its cart under a single key and always replaces the whole
//! list; there are no partial updates at this layer.

use std::io;

use mockall::automock;
use thiserror::Error;

use boxcart::items::CartLineItem;

mod file;
mod memory;

pub use file::FileCartStore;
pub use memory::MemoryCartStore;

/// Errors raised by local cart storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cart storage unavailable")]
    Io(#[from] io::Error),

    #[error("stored cart is corrupt")]
    Corrupt(#[from] serde_json::Error),

    #[error("cart storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value storage for the device's cart.
#[automock]
pub trait LocalCartStore: Send + Sync {
    /// Read the lines stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<CartLineItem>>, StoreError>;

    /// Replace the lines stored under `key`.
    fn set(&self, key: &str, items: &[CartLineItem]) -> Result<(), StoreError>;
}
