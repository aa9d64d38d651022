//! Cart reconciliation and shipping quotes on top of the `boxcart` domain
//! library: storage, server and inventory clients, configuration and logging.

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod session;

#[cfg(test)]
mod test;
