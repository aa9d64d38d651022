//! boxcart
//!
//! Cart and shipping logic for an industrial parts storefront: choosing a
//! shipping box for a cart, and merging a device's local cart with the
//! signed-in user's server cart.

pub mod cart;
pub mod fixtures;
pub mod items;
pub mod packaging;
pub mod prelude;
pub mod products;
pub mod shipping;
pub mod summary;
pub mod uuids;
