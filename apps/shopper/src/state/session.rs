//! # Session State
//!
//! The single owner of the shopping state for this process, injected into
//! every command.
//!
//! ## Thread Safety
//! The store sits behind a `tokio::sync::Mutex`: a command locks it,
//! mutates, awaits the snapshot write and releases. Commands therefore
//! apply one at a time, in lock order.
//!
//! ```text
//! command A ──lock──► mutate ──► persist.await ──► unlock
//! command B ─────────────── waits ──────────────────────► lock ──► ...
//! ```

use std::sync::Arc;

use market_core::{ShoppingStateStore, SortKey};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use super::sink::AppSink;
use crate::catalog::Catalog;

/// Shared handle to the session. Clones point at the same store.
#[derive(Debug, Clone)]
pub struct SessionState {
    store: Arc<Mutex<ShoppingStateStore<AppSink>>>,
    catalog: Arc<Catalog>,
    default_sort: SortKey,
}

impl SessionState {
    /// Rehydrates the store from `sink` and wraps it with the catalog.
    pub async fn open(
        store_name: impl Into<String>,
        sink: AppSink,
        catalog: Catalog,
        default_sort: SortKey,
    ) -> Self {
        let backend = sink.backend();
        let store = ShoppingStateStore::open(store_name, sink).await;

        info!(
            store = %store.name(),
            %backend,
            products = catalog.len(),
            "Session ready"
        );

        SessionState {
            store: Arc::new(Mutex::new(store)),
            catalog: Arc::new(catalog),
            default_sort,
        }
    }

    /// Locks the store for one command.
    pub async fn store(&self) -> MutexGuard<'_, ShoppingStateStore<AppSink>> {
        self.store.lock().await
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn default_sort(&self) -> SortKey {
        self.default_sort
    }
}
