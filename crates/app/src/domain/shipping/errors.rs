//! Shipping errors.

use thiserror::Error;

use boxcart::fixtures::FixtureError;

/// Errors raised while fetching the box inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to load box inventory: {0}")]
    Fixture(#[from] FixtureError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from inventory server: {0}")]
    UnexpectedResponse(String),
}

/// Errors raised while quoting a shipment.
#[derive(Debug, Error)]
pub enum ShippingError {
    #[error("box inventory unavailable: {0}")]
    Inventory(#[from] InventoryError),
}
