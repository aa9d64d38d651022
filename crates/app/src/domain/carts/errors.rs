//! Cart errors.

use thiserror::Error;

use crate::domain::carts::{local::StoreError, remote::RemoteCartError};

/// Errors returned to callers of cart operations.
///
/// Only local storage failures surface here; server failures are logged and
/// the operation carries on with the local cart.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("local cart storage failed: {0}")]
    Store(#[from] StoreError),
}

/// A server write that did not go through.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cart server request failed: {0}")]
    Remote(#[from] RemoteCartError),
}
