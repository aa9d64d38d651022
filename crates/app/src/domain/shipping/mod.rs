//! Shipping

pub mod errors;
pub mod inventory;
pub mod service;

pub use errors::{InventoryError, ShippingError};
pub use inventory::{BoxInventory, FixtureBoxInventory, HttpBoxInventory};
pub use service::{ShippingQuote, ShippingService};
