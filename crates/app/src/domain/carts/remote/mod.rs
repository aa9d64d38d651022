//! Remote cart API
//!
//! The signed-in user's cart lives on the server. Lines there carry
//! server-assigned ids, distinct from product ids, and only those ids can be
//! updated or deleted.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use boxcart::{
    items::{CartLineItem, ServerLineUuid},
    products::ProductUuid,
};

use crate::session::UserUuid;

mod http;

pub use http::{HttpCartApi, HttpCartApiConfig};

/// Errors that can occur when talking to the cart server.
#[derive(Debug, Error)]
pub enum RemoteCartError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx response or unexpected body.
    #[error("unexpected response from cart server: {0}")]
    UnexpectedResponse(String),
}

/// A line to create on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewServerLine {
    pub product: ProductUuid,
    pub quantity: u32,
}

#[automock]
#[async_trait]
pub trait RemoteCartApi: Send + Sync {
    /// List the user's server cart. Every returned line has a server id.
    async fn list(&self, user: UserUuid) -> Result<Vec<CartLineItem>, RemoteCartError>;

    /// Create a line in the user's server cart.
    async fn create(
        &self,
        user: UserUuid,
        line: NewServerLine,
    ) -> Result<CartLineItem, RemoteCartError>;

    /// Change the quantity of a server line.
    async fn update(&self, line: ServerLineUuid, quantity: u32) -> Result<(), RemoteCartError>;

    /// Delete a server line.
    async fn delete(&self, line: ServerLineUuid) -> Result<(), RemoteCartError>;
}
