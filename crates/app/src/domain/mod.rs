//! Application domain: carts and shipping.

pub mod carts;
pub mod shipping;
