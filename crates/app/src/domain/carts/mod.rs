//! Carts

pub mod errors;
pub mod events;
pub mod local;
pub mod reconciler;
pub mod remote;

pub use errors::{CartError, SyncError};
pub use events::{BroadcastCartEvents, CartEvent, CartEvents};
pub use local::{FileCartStore, LocalCartStore, MemoryCartStore, StoreError};
pub use reconciler::*;
pub use remote::{HttpCartApi, HttpCartApiConfig, NewServerLine, RemoteCartApi, RemoteCartError};
