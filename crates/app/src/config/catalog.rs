//! Catalog Config

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

/// Unknown ISO currency code.
#[derive(Debug, Error)]
#[error("unknown currency code: {0}")]
pub struct CurrencyNotFound(pub String);

/// Product catalog and box inventory settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Product catalog YAML
    #[arg(
        long,
        env = "BOXCART_CATALOG",
        default_value = "fixtures/catalog.yml",
        global = true
    )]
    pub catalog: PathBuf,

    /// Box inventory YAML; the server inventory is used when omitted
    #[arg(long, env = "BOXCART_BOXES", global = true)]
    pub boxes: Option<PathBuf>,

    /// ISO currency code prices are shown in
    #[arg(long, env = "BOXCART_CURRENCY", default_value = "GBP", global = true)]
    pub currency: String,
}

impl CatalogConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyNotFound`] for codes outside ISO 4217.
    pub fn currency(&self) -> Result<&'static Currency, CurrencyNotFound> {
        iso::find(&self.currency).ok_or_else(|| CurrencyNotFound(self.currency.clone()))
    }
}
