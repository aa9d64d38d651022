//! Cart reconciler
//!
//! Keeps the device cart and the account cart presented as one. Every
//! mutation lands in local storage and the in-memory view first; the server
//! write that follows may fail without undoing either.

use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use rustc_hash::FxHashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use boxcart::{
    cart::{MergedCart, add_to_local, merge, set_local_quantity},
    items::{CartLineItem, ServerLineUuid},
    products::ProductUuid,
};

use crate::{
    domain::carts::{
        errors::{CartError, SyncError},
        events::{CartEvent, CartEvents},
        local::LocalCartStore,
        remote::{NewServerLine, RemoteCartApi, RemoteCartError},
    },
    session::{Session, UserUuid},
};

/// Reconciler settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Key the device cart is stored under.
    pub storage_key: String,

    /// Copy device-only lines to the account cart on sign-in.
    pub migrate_on_sign_in: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            storage_key: "cart".to_string(),
            migrate_on_sign_in: false,
        }
    }
}

/// A server write waiting to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerOp {
    /// Add `quantity` to the user's line for `product`, creating it if needed.
    Upsert {
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    },

    /// Set a server line to an absolute quantity.
    Update {
        line: ServerLineUuid,
        product: ProductUuid,
        quantity: u32,
    },

    /// Remove a server line.
    Delete {
        line: ServerLineUuid,
        product: ProductUuid,
    },
}

impl ServerOp {
    fn product(&self) -> ProductUuid {
        match self {
            Self::Upsert { product, .. }
            | Self::Update { product, .. }
            | Self::Delete { product, .. } => *product,
        }
    }

    /// Absolute changes can be overtaken by a newer change to the same product.
    fn is_absolute(&self) -> bool {
        matches!(self, Self::Update { .. } | Self::Delete { .. })
    }
}

/// The server half of a mutation whose local half has already been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct PendingSync {
    sequence: u64,
    op: Option<ServerOp>,
}

impl PendingSync {
    /// The server write, or `None` when the mutation stays on the device.
    pub fn op(&self) -> Option<&ServerOp> {
        self.op.as_ref()
    }

    /// Whether there is nothing to send.
    pub fn is_local_only(&self) -> bool {
        self.op.is_none()
    }
}

/// What happened to the server half of a mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No server write was needed.
    LocalOnly,

    /// The server accepted the write.
    Applied,

    /// A newer change to the same product was staged first; nothing was sent.
    Superseded,

    /// The server write failed and was logged.
    Failed,
}

/// Merges and mutates the device and account carts.
pub struct CartReconciler {
    store: Arc<dyn LocalCartStore>,
    remote: Arc<dyn RemoteCartApi>,
    events: Arc<dyn CartEvents>,
    config: ReconcilerConfig,
    session: RwLock<Session>,
    snapshot: Mutex<MergedCart>,
    sequence: AtomicU64,
    latest: Mutex<FxHashMap<ProductUuid, u64>>,
}

impl fmt::Debug for CartReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartReconciler")
            .field("config", &self.config)
            .field("session", &self.session())
            .finish_non_exhaustive()
    }
}

impl CartReconciler {
    pub fn new(
        store: Arc<dyn LocalCartStore>,
        remote: Arc<dyn RemoteCartApi>,
        events: Arc<dyn CartEvents>,
        config: ReconcilerConfig,
    ) -> Self {
        Self {
            store,
            remote,
            events,
            config,
            session: RwLock::new(Session::Anonymous),
            snapshot: Mutex::new(MergedCart::default()),
            sequence: AtomicU64::new(0),
            latest: Mutex::new(FxHashMap::default()),
        }
    }

    /// Start from the given session instead of anonymous.
    #[must_use]
    pub fn with_session(self, session: Session) -> Self {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;

        self
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn session(&self) -> Session {
        *self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The most recent view, including mutations not yet confirmed by the
    /// server.
    pub fn current_view(&self) -> MergedCart {
        self.lock_snapshot().clone()
    }

    /// The device cart as stored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage cannot be read.
    pub fn local_cart(&self) -> Result<Vec<CartLineItem>, CartError> {
        Ok(self
            .store
            .get(&self.config.storage_key)?
            .unwrap_or_default())
    }

    /// Build the view from both carts and remember it as the current view.
    ///
    /// A failed server read degrades to the device cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage cannot be read.
    pub async fn merged_view(&self) -> Result<MergedCart, CartError> {
        let local = self.local_cart()?;

        let view = match self.session() {
            Session::Anonymous => MergedCart::local_only(&local),
            Session::Authenticated(user) => match self.remote.list(user).await {
                Ok(server) => merge(&local, &server),
                Err(error) => {
                    warn!(%user, %error, "server cart unavailable, showing device cart");

                    MergedCart::degraded(&local)
                }
            },
        };

        debug!(lines = view.len(), source = ?view.source(), "cart view rebuilt");

        *self.lock_snapshot() = view.clone();

        Ok(view)
    }

    /// Apply the local half of adding `quantity` of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage fails; the view is
    /// left untouched and nothing will be sent to the server.
    pub fn stage_add(
        &self,
        item: &CartLineItem,
        quantity: u32,
    ) -> Result<PendingSync, CartError> {
        let sequence = self.next_sequence();

        if quantity == 0 {
            return Ok(PendingSync { sequence, op: None });
        }

        let mut local = self.local_cart()?;
        let line = add_to_local(&mut local, item, quantity);

        self.store.set(&self.config.storage_key, &local)?;
        self.lock_snapshot().apply_add(&line, quantity);
        self.lock_latest().insert(item.product, sequence);
        self.events.publish(CartEvent::LocalUpdated);

        let op = self.session().user().map(|user| ServerOp::Upsert {
            user,
            product: item.product,
            quantity,
        });

        debug!(code = %item.code, quantity, local_only = op.is_none(), "staged add");

        Ok(PendingSync { sequence, op })
    }

    /// Apply the local half of setting `line` to `quantity`. Zero or less
    /// removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage fails.
    pub fn stage_set_quantity(
        &self,
        line: &CartLineItem,
        quantity: i64,
    ) -> Result<PendingSync, CartError> {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        let mut local = self.local_cart()?;

        // a line only known to the server is kept on the device too, so the
        // new quantity survives a failed write
        let stored = if set_local_quantity(&mut local, line.product, quantity) {
            true
        } else if quantity > 0 {
            local.push(line.clone().with_quantity(quantity));
            true
        } else {
            false
        };

        if stored {
            self.store.set(&self.config.storage_key, &local)?;
        }

        let shown = self.lock_snapshot().apply_quantity(line.product, quantity);

        if stored || shown {
            self.events.publish(CartEvent::LocalUpdated);
        }

        let sequence = self.next_sequence();
        self.lock_latest().insert(line.product, sequence);

        let op = match (line.id.server_id(), self.session().is_authenticated()) {
            (Some(server_line), true) if quantity == 0 => Some(ServerOp::Delete {
                line: server_line,
                product: line.product,
            }),
            (Some(server_line), true) => Some(ServerOp::Update {
                line: server_line,
                product: line.product,
                quantity,
            }),
            _ => None,
        };

        debug!(code = %line.code, quantity, local_only = op.is_none(), "staged quantity");

        Ok(PendingSync { sequence, op })
    }

    /// Send the server half of a staged mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the server rejects or cannot be
    /// reached. Local state is never rolled back.
    pub async fn sync(&self, pending: PendingSync) -> Result<SyncOutcome, SyncError> {
        let Some(op) = pending.op else {
            return Ok(SyncOutcome::LocalOnly);
        };

        if op.is_absolute() && self.is_superseded(op.product(), pending.sequence) {
            debug!(product = %op.product(), sequence = pending.sequence, "skipping superseded write");

            return Ok(SyncOutcome::Superseded);
        }

        match &op {
            ServerOp::Upsert {
                user,
                product,
                quantity,
            } => self.upsert(*user, *product, *quantity).await?,
            ServerOp::Update { line, quantity, .. } => {
                self.remote.update(*line, *quantity).await?;
            }
            ServerOp::Delete { line, .. } => self.remote.delete(*line).await?,
        }

        info!(?op, "server cart updated");

        self.events.publish(CartEvent::ServerUpdated);

        Ok(SyncOutcome::Applied)
    }

    /// Send the server half in the background.
    pub fn spawn_sync(self: &Arc<Self>, pending: PendingSync) -> JoinHandle<SyncOutcome> {
        let reconciler = Arc::clone(self);

        tokio::spawn(async move { reconciler.dispatch(pending).await })
    }

    /// Add `quantity` of `item` to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage fails. Server failures
    /// are logged and reported as [`SyncOutcome::Failed`].
    pub async fn add_item(
        &self,
        item: &CartLineItem,
        quantity: u32,
    ) -> Result<SyncOutcome, CartError> {
        let pending = self.stage_add(item, quantity)?;

        Ok(self.dispatch(pending).await)
    }

    /// Set the quantity of `line`; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage fails. Server failures
    /// are logged and reported as [`SyncOutcome::Failed`].
    pub async fn set_quantity(
        &self,
        line: &CartLineItem,
        quantity: i64,
    ) -> Result<SyncOutcome, CartError> {
        let pending = self.stage_set_quantity(line, quantity)?;

        Ok(self.dispatch(pending).await)
    }

    /// Create on the server every device line whose product the account
    /// cart lacks. Returns how many lines were created.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage cannot be read.
    pub async fn push_local_only(&self) -> Result<usize, CartError> {
        let Session::Authenticated(user) = self.session() else {
            return Ok(0);
        };

        let local = self.local_cart()?;

        let server = match self.remote.list(user).await {
            Ok(server) => server,
            Err(error) => {
                warn!(%user, %error, "server cart unavailable, device lines not copied");

                return Ok(0);
            }
        };

        let mut pushed = 0;

        for line in local
            .iter()
            .filter(|line| !server.iter().any(|existing| existing.product == line.product))
        {
            let new_line = NewServerLine {
                product: line.product,
                quantity: line.quantity,
            };

            match self.remote.create(user, new_line).await {
                Ok(_) => pushed += 1,
                Err(error) => warn!(code = %line.code, %error, "failed to copy device line"),
            }
        }

        if pushed > 0 {
            info!(%user, pushed, "device lines copied to server cart");

            self.events.publish(CartEvent::ServerUpdated);
        }

        Ok(pushed)
    }

    /// Switch to `user` and rebuild the view.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage cannot be read.
    pub async fn sign_in(&self, user: UserUuid) -> Result<MergedCart, CartError> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) =
            Session::Authenticated(user);

        info!(%user, "signed in");

        if self.config.migrate_on_sign_in {
            self.push_local_only().await?;
        }

        self.merged_view().await
    }

    /// Return to an anonymous session. The device cart is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when local storage cannot be read.
    pub fn sign_out(&self) -> Result<MergedCart, CartError> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Session::Anonymous;

        let view = MergedCart::local_only(&self.local_cart()?);

        *self.lock_snapshot() = view.clone();

        info!("signed out");

        Ok(view)
    }

    async fn dispatch(&self, pending: PendingSync) -> SyncOutcome {
        match self.sync(pending).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "keeping device cart after failed server write");

                SyncOutcome::Failed
            }
        }
    }

    async fn upsert(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), RemoteCartError> {
        let server = self.remote.list(user).await?;

        let existing = server
            .iter()
            .filter(|line| line.product == product)
            .find_map(|line| line.id.server_id().map(|id| (id, line.quantity)));

        match existing {
            Some((line, current)) => {
                self.remote
                    .update(line, current.saturating_add(quantity))
                    .await
            }
            None => {
                self.remote
                    .create(user, NewServerLine { product, quantity })
                    .await?;

                Ok(())
            }
        }
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed).saturating_add(1)
    }

    fn is_superseded(&self, product: ProductUuid, sequence: u64) -> bool {
        self.lock_latest()
            .get(&product)
            .is_some_and(|latest| *latest > sequence)
    }

    fn lock_snapshot(&self) -> MutexGuard<'_, MergedCart> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_latest(&self) -> MutexGuard<'_, FxHashMap<ProductUuid, u64>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
