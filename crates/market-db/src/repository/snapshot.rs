//! # Snapshot Repository
//!
//! Raw access to the `store_snapshots` table. Payloads are opaque JSON text
//! here; encoding and decoding belong to `market_core::snapshot`.
//!
//! ## Table
//! ```text
//! store_snapshots
//! ┌────────────────────┬──────────────────────────────┬──────────────────────┐
//! │ name (PK)          │ payload                      │ updated_at (RFC3339) │
//! ├────────────────────┼──────────────────────────────┼──────────────────────┤
//! │ marketplace-store  │ {"user":null,"cart":[...]…}  │ 2024-06-01T12:00:00Z │
//! └────────────────────┴──────────────────────────────┴──────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// One stored snapshot row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub name: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for snapshot rows.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Fetches the row stored under `name`.
    pub async fn get(&self, name: &str) -> DbResult<Option<SnapshotRecord>> {
        let record = sqlx::query_as::<_, SnapshotRecord>(
            r#"
            SELECT name, payload, updated_at
            FROM store_snapshots
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Inserts or replaces the payload stored under `name`.
    ///
    /// ## Returns
    /// The `updated_at` timestamp written.
    pub async fn put(&self, name: &str, payload: &str) -> DbResult<DateTime<Utc>> {
        let now = Utc::now();

        debug!(name = %name, bytes = payload.len(), "Writing snapshot");

        sqlx::query(
            r#"
            INSERT INTO store_snapshots (name, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(name)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(now)
    }

    /// Lists stored snapshot names, alphabetically.
    pub async fn list_names(&self) -> DbResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM store_snapshots ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let db = db().await;
        assert!(db.snapshots().get("marketplace-store").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let db = db().await;
        let repo = db.snapshots();

        repo.put("marketplace-store", r#"{"searchQuery":"a"}"#).await.unwrap();
        let record = repo.get("marketplace-store").await.unwrap().unwrap();

        assert_eq!(record.name, "marketplace-store");
        assert_eq!(record.payload, r#"{"searchQuery":"a"}"#);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_row() {
        let db = db().await;
        let repo = db.snapshots();

        repo.put("marketplace-store", "{}").await.unwrap();
        repo.put("marketplace-store", r#"{"searchQuery":"b"}"#).await.unwrap();

        assert_eq!(repo.list_names().await.unwrap(), vec!["marketplace-store"]);
        let record = repo.get("marketplace-store").await.unwrap().unwrap();
        assert_eq!(record.payload, r#"{"searchQuery":"b"}"#);
    }

    #[tokio::test]
    async fn test_list_names_sorted() {
        let db = db().await;
        let repo = db.snapshots();
        repo.put("b", "{}").await.unwrap();
        repo.put("a", "{}").await.unwrap();

        assert_eq!(repo.list_names().await.unwrap(), vec!["a", "b"]);
    }
}
