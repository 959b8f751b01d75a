//! # Shopping State Store
//!
//! [`StoreState`] plus write-through persistence.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ShoppingStateStore<S>                               │
//! │                                                                         │
//! │  store.add_to_cart(product, qty).await                                  │
//! │       │                                                                 │
//! │       ├── 1. state.add_to_cart(..)      in memory, never fails          │
//! │       │                                                                 │
//! │       ├── 2. sink.persist(name, &state) awaited before returning        │
//! │       │                                                                 │
//! │       └── 3. Persistence::Persisted | Persistence::Failed(err)          │
//! │                                        │                                │
//! │                                        └── warn!, state NOT rolled back │
//! │                                                                         │
//! │  ShoppingStateStore::open(name, sink).await                             │
//! │       ├── Ok(Some(state)) ──► rehydrated                                │
//! │       ├── Ok(None)        ──► defaults                                  │
//! │       └── Err(e)          ──► defaults + warn!                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sinks
//! - [`MemorySink`]: process-local map of JSON text (tests, `memory` backend)
//! - `market_db::SqliteSnapshotSink`: one SQLite row per store name

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::catalog::{FilterPatch, SortKey};
use crate::error::{PersistError, PersistResult};
use crate::profile::{ProfileEdit, User};
use crate::snapshot;
use crate::state::StoreState;
use crate::types::Product;
use crate::validation::Quantity;

// =============================================================================
// Snapshot Sink
// =============================================================================

/// Durable destination for the serialized store.
///
/// Implementations may complete immediately or await real I/O. The store
/// calls `persist` once per mutation and `load` once at startup.
pub trait SnapshotSink: Send + Sync {
    /// Loads the snapshot stored under `name`, `Ok(None)` if there is none.
    fn load(&self, name: &str) -> impl Future<Output = PersistResult<Option<StoreState>>> + Send;

    /// Replaces the snapshot stored under `name`.
    fn persist(&self, name: &str, state: &StoreState) -> impl Future<Output = PersistResult<()>> + Send;
}

/// Outcome of the write-through step of a mutation.
///
/// A failure is a warning: the in-memory state already holds the change.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Persisted,
    Failed(PersistError),
}

impl Persistence {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Persistence::Persisted)
    }

    /// Returns the write error, if the snapshot was not stored.
    pub fn error(&self) -> Option<&PersistError> {
        match self {
            Persistence::Persisted => None,
            Persistence::Failed(err) => Some(err),
        }
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// In-process snapshot storage keyed by store name.
///
/// Holds encoded JSON text so a round trip exercises the same codec as a
/// durable sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw snapshot text, e.g. one written by an older build.
    pub fn with_raw(name: impl Into<String>, payload: impl Into<String>) -> Self {
        let sink = Self::default();
        if let Ok(mut entries) = sink.entries.lock() {
            entries.insert(name.into(), payload.into());
        }
        sink
    }

    /// Makes every following `persist` fail with `Unavailable` (or succeed
    /// again).
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    /// Returns the raw snapshot text stored under `name`.
    pub fn raw(&self, name: &str) -> Option<String> {
        self.entries.lock().ok()?.get(name).cloned()
    }

    /// Stored snapshot names, alphabetically.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn read(&self, name: &str) -> PersistResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PersistError::Unavailable("memory sink lock poisoned".to_string()))?;
        Ok(entries.get(name).cloned())
    }

    fn write(&self, name: &str, payload: String) -> PersistResult<()> {
        let failing = self
            .fail_writes
            .lock()
            .map(|flag| *flag)
            .map_err(|_| PersistError::Unavailable("memory sink lock poisoned".to_string()))?;
        if failing {
            return Err(PersistError::Unavailable("memory sink rejected write".to_string()));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PersistError::Unavailable("memory sink lock poisoned".to_string()))?;
        entries.insert(name.to_string(), payload);
        Ok(())
    }
}

impl SnapshotSink for MemorySink {
    async fn load(&self, name: &str) -> PersistResult<Option<StoreState>> {
        match self.read(name)? {
            Some(payload) => snapshot::decode(name, &payload).map(Some),
            None => Ok(None),
        }
    }

    async fn persist(&self, name: &str, state: &StoreState) -> PersistResult<()> {
        let payload = snapshot::encode(name, state)?;
        self.write(name, payload)
    }
}

// =============================================================================
// Shopping State Store
// =============================================================================

/// The single owner of the shopping state.
///
/// Reads go through [`ShoppingStateStore::state`]; every mutation is
/// flushed to the sink before it returns.
#[derive(Debug)]
pub struct ShoppingStateStore<S: SnapshotSink> {
    name: String,
    state: StoreState,
    sink: S,
}

impl<S: SnapshotSink> ShoppingStateStore<S> {
    /// Opens the store, rehydrating from the snapshot stored under `name`.
    ///
    /// A missing or unreadable snapshot yields the default state.
    pub async fn open(name: impl Into<String>, sink: S) -> Self {
        let name = name.into();

        let state = match sink.load(&name).await {
            Ok(Some(state)) => {
                info!(
                    store = %name,
                    cart_lines = state.cart().item_count(),
                    wishlist = state.wishlist().len(),
                    "Rehydrated shopping state"
                );
                state
            }
            Ok(None) => {
                info!(store = %name, "No snapshot found, starting with defaults");
                StoreState::default()
            }
            Err(e) => {
                warn!(store = %name, error = %e, "Failed to load snapshot, starting with defaults");
                StoreState::default()
            }
        };

        ShoppingStateStore { name, state, sink }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state (read-only).
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // =========================================================================
    // Operations
    // =========================================================================

    pub async fn set_user(&mut self, user: Option<User>) -> Persistence {
        debug!(user_id = ?user.as_ref().map(|u| u.id.as_str()), "set_user");
        self.state.set_user(user);
        self.flush().await
    }

    pub async fn add_to_cart(&mut self, product: Product, quantity: Quantity) -> Persistence {
        debug!(product_id = %product.id, quantity = quantity.get(), "add_to_cart");
        self.state.add_to_cart(product, quantity);
        self.flush().await
    }

    /// Removes the line for `product_id`. The snapshot is rewritten even
    /// when nothing was removed.
    pub async fn remove_from_cart(&mut self, product_id: &str) -> Persistence {
        let removed = self.state.remove_from_cart(product_id);
        debug!(product_id, removed, "remove_from_cart");
        self.flush().await
    }

    pub async fn clear_cart(&mut self) -> Persistence {
        debug!(lines = self.state.cart().item_count(), "clear_cart");
        self.state.clear_cart();
        self.flush().await
    }

    /// Returns whether the product is wishlisted afterwards.
    pub async fn toggle_wishlist(&mut self, product: Product) -> (bool, Persistence) {
        let product_id = product.id.clone();
        let wishlisted = self.state.toggle_wishlist(product);
        debug!(product_id = %product_id, wishlisted, "toggle_wishlist");
        (wishlisted, self.flush().await)
    }

    pub async fn add_to_recently_viewed(&mut self, product: Product) -> Persistence {
        debug!(product_id = %product.id, "add_to_recently_viewed");
        self.state.add_to_recently_viewed(product);
        self.flush().await
    }

    pub async fn update_filters(&mut self, patch: FilterPatch) -> Persistence {
        debug!(?patch, "update_filters");
        self.state.update_filters(patch);
        self.flush().await
    }

    pub async fn set_search_query(&mut self, query: impl Into<String>) -> Persistence {
        let query = query.into();
        debug!(query = %query, "set_search_query");
        self.state.set_search_query(query);
        self.flush().await
    }

    /// Applies a profile edit; returns `false` if nobody is signed in.
    pub async fn edit_profile(&mut self, edit: ProfileEdit) -> (bool, Persistence) {
        let applied = self.state.edit_profile(edit);
        if !applied {
            debug!("edit_profile ignored, no user signed in");
        }
        (applied, self.flush().await)
    }

    /// Filters and sorts `products` with the current filters and query.
    pub fn browse<'a>(&self, products: &'a [Product], sort: SortKey) -> Vec<&'a Product> {
        self.state.browse(products, sort)
    }

    async fn flush(&self) -> Persistence {
        match self.sink.persist(&self.name, &self.state).await {
            Ok(()) => Persistence::Persisted,
            Err(e) => {
                warn!(store = %self.name, error = %e, "Snapshot write failed, keeping in-memory state");
                Persistence::Failed(e)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
