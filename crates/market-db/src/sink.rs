//! # SQLite Snapshot Sink
//!
//! [`SnapshotSink`] backed by the `store_snapshots` table.
//!
//! ```text
//! ShoppingStateStore ──persist──► snapshot::encode ──► SnapshotRepository::put
//!                    ◄──load───── snapshot::decode ◄── SnapshotRepository::get
//! ```

use market_core::error::PersistResult;
use market_core::snapshot;
use market_core::{SnapshotSink, StoreState};
use tracing::debug;

use crate::pool::Database;

/// Durable snapshot sink. Every `persist` is one upsert.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotSink {
    db: Database,
}

impl SqliteSnapshotSink {
    pub fn new(db: Database) -> Self {
        SqliteSnapshotSink { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl SnapshotSink for SqliteSnapshotSink {
    async fn load(&self, name: &str) -> PersistResult<Option<StoreState>> {
        let Some(record) = self.db.snapshots().get(name).await? else {
            return Ok(None);
        };

        debug!(name = %name, updated_at = %record.updated_at, "Loaded snapshot row");
        snapshot::decode(name, &record.payload).map(Some)
    }

    async fn persist(&self, name: &str, state: &StoreState) -> PersistResult<()> {
        let payload = snapshot::encode(name, state)?;
        self.db.snapshots().put(name, &payload).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use chrono::Utc;
    use market_core::{
        FilterPatch, Money, PersistError, PriceRange, Product, Quantity, Rating, ShoppingStateStore,
        UserRef, STORE_NAME,
    };

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            description: String::new(),
            price: Money::from_cents(cents),
            images: vec![],
            category: "Home".to_string(),
            seller: UserRef {
                id: "s1".to_string(),
                name: "Home Goods".to_string(),
            },
            rating: Rating::from_tenths(42),
            reviews: vec![],
            stock: 10,
            created_at: Utc::now(),
            delivery_options: vec![],
        }
    }

    async fn sink() -> SqliteSnapshotSink {
        SqliteSnapshotSink::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_round_trip_through_sqlite() {
        let sink = sink().await;

        let expected = {
            let mut store = ShoppingStateStore::open(STORE_NAME, sink.clone()).await;
            let _ = store
                .add_to_cart(product("lamp", 3499), Quantity::try_from(2).unwrap())
                .await;
            let _ = store.toggle_wishlist(product("mug", 899)).await;
            let _ = store
                .update_filters(FilterPatch {
                    price_range: Some(PriceRange::new(Money::zero(), Money::from_dollars(40))),
                    ..FilterPatch::default()
                })
                .await;
            store.state().clone()
        };

        // Same pool, fresh store: only the table carries the state across.
        let reopened = ShoppingStateStore::open(STORE_NAME, sink).await;
        assert_eq!(reopened.state(), &expected);
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let sink = sink().await;
        assert_eq!(sink.load(STORE_NAME).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_row_is_decode_error() {
        let sink = sink().await;
        sink.database().snapshots().put(STORE_NAME, "not json").await.unwrap();

        let err = sink.load(STORE_NAME).await.unwrap_err();
        assert!(matches!(err, PersistError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_closed_pool_reports_failure_and_keeps_state() {
        let sink = sink().await;
        let mut store = ShoppingStateStore::open(STORE_NAME, sink.clone()).await;
        sink.database().close().await;

        let outcome = store.set_search_query("desk").await;

        assert!(matches!(outcome.error(), Some(PersistError::Unavailable(_))));
        assert_eq!(store.state().search_query(), "desk");
    }
}
