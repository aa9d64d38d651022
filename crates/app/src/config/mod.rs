//! Application configuration

use clap::Args;

use crate::config::{
    catalog::CatalogConfig, logging::LoggingConfig, remote::RemoteConfig, store::StoreConfig,
};

pub mod catalog;
pub mod logging;
pub mod remote;
pub mod store;

pub use catalog::CurrencyNotFound;
pub use logging::LogFormat;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Device cart storage settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Cart server settings.
    #[command(flatten)]
    pub remote: RemoteConfig,

    /// Product catalog and box inventory settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,
}
