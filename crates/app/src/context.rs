//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use thiserror::Error;

use boxcart::fixtures::{Catalog, FixtureError};

use crate::{
    config::{AppConfig, CurrencyNotFound},
    domain::{
        carts::{
            BroadcastCartEvents, CartError, CartReconciler, FileCartStore, HttpCartApi,
            HttpCartApiConfig, ReconcilerConfig,
        },
        shipping::{BoxInventory, FixtureBoxInventory, HttpBoxInventory, ShippingService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load catalog: {0}")]
    Catalog(#[source] FixtureError),

    #[error(transparent)]
    Currency(#[from] CurrencyNotFound),

    #[error("failed to sign in: {0}")]
    SignIn(#[source] CartError),
}

/// Everything a command needs, wired from configuration.
#[derive(Clone)]
pub struct AppContext {
    pub reconciler: Arc<CartReconciler>,
    pub shipping: ShippingService,
    pub catalog: Arc<Catalog>,
    pub currency: &'static Currency,
}

impl AppContext {
    /// Build application context and sign in the configured user, copying
    /// device-only lines to the server when migration is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error when [`AppContext::from_config`] fails or the device
    /// cart cannot be read while signing in.
    pub async fn open(config: &AppConfig) -> Result<Self, AppInitError> {
        let ctx = Self::from_config(config)?;

        if let Some(user) = config.remote.user() {
            ctx.reconciler
                .sign_in(user)
                .await
                .map_err(AppInitError::SignIn)?;
        }

        Ok(ctx)
    }

    /// Build application context from configuration. The session starts
    /// anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be loaded or the currency is
    /// unknown.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let catalog = Catalog::load(&config.catalog.catalog).map_err(AppInitError::Catalog)?;
        let currency = config.catalog.currency()?;

        let remote = HttpCartApi::new(HttpCartApiConfig {
            base_url: config.remote.api_url.clone(),
            token: config.remote.api_token.clone(),
        });

        let reconciler = CartReconciler::new(
            Arc::new(FileCartStore::new(&config.store.cart_dir)),
            Arc::new(remote),
            Arc::new(BroadcastCartEvents::default()),
            ReconcilerConfig {
                storage_key: config.store.storage_key.clone(),
                migrate_on_sign_in: config.remote.migrate_on_sign_in,
            },
        );

        let inventory: Arc<dyn BoxInventory> = match &config.catalog.boxes {
            Some(path) => Arc::new(FixtureBoxInventory::new(path)),
            None => Arc::new(HttpBoxInventory::new(config.remote.api_url.clone())),
        };

        Ok(Self {
            reconciler: Arc::new(reconciler),
            shipping: ShippingService::new(inventory),
            catalog: Arc::new(catalog),
            currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use testresult::TestResult;

    use boxcart::cart::ViewSource;

    use crate::{
        config::{
            LogFormat, catalog::CatalogConfig, logging::LoggingConfig, remote::RemoteConfig,
            store::StoreConfig,
        },
        domain::carts::LocalCartStore,
        session::Session,
        test::helpers::{local_line, user},
    };

    use super::*;

    fn config(cart_dir: &Path, signed_in: bool) -> AppConfig {
        AppConfig {
            logging: LoggingConfig {
                log_level: "warn".to_string(),
                log_format: LogFormat::Compact,
            },
            store: StoreConfig {
                cart_dir: cart_dir.to_path_buf(),
                storage_key: "cart".to_string(),
            },
            remote: RemoteConfig {
                // nothing listens on the discard port
                api_url: "http://127.0.0.1:9".to_string(),
                api_token: None,
                user: signed_in.then(|| user().into_uuid()),
                migrate_on_sign_in: true,
            },
            catalog: CatalogConfig {
                catalog: PathBuf::from(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/../../fixtures/catalog.yml"
                )),
                boxes: None,
                currency: "GBP".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn open_signs_in_the_configured_user() -> TestResult {
        let dir = tempfile::tempdir()?;
        FileCartStore::new(dir.path()).set("cart", &[local_line("CLM-M8", 2)])?;

        let ctx = AppContext::open(&config(dir.path(), true)).await?;

        assert_eq!(ctx.reconciler.session(), Session::Authenticated(user()));
        assert!(ctx.reconciler.config().migrate_on_sign_in);

        let view = ctx.reconciler.current_view();

        assert_eq!(view.source(), ViewSource::Degraded);
        assert_eq!(view.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn open_without_a_user_stays_anonymous() -> TestResult {
        let dir = tempfile::tempdir()?;

        let ctx = AppContext::open(&config(dir.path(), false)).await?;

        assert_eq!(ctx.reconciler.session(), Session::Anonymous);
        assert_eq!(ctx.catalog.len(), 5);

        Ok(())
    }
}
