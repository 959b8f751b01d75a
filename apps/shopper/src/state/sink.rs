//! # App Sink
//!
//! The snapshot sink chosen by `[storage] backend`.

use market_core::error::PersistResult;
use market_core::{MemorySink, SnapshotSink, StoreState};
use market_db::migrations::migration_status;
use market_db::{Database, DbConfig, DbResult, SqliteSnapshotSink};
use serde::Serialize;

use crate::config::{AppConfig, StorageBackend};
use crate::error::ApiError;

/// Either storage backend, behind one concrete type so the session can name
/// `ShoppingStateStore<AppSink>`.
#[derive(Debug)]
pub enum AppSink {
    Sqlite(SqliteSnapshotSink),
    Memory(MemorySink),
}

/// Diagnostic view of the snapshot storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStatus {
    pub backend: StorageBackend,
    pub healthy: bool,
    /// `(applied, total)` migrations; SQLite only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<(usize, usize)>,
    /// Names of the stored snapshots.
    pub snapshots: Vec<String>,
}

impl AppSink {
    /// Opens the backend named in the config.
    pub async fn open(config: &AppConfig) -> Result<Self, ApiError> {
        match config.storage.backend {
            StorageBackend::Sqlite => {
                let path = config.database_path()?;
                Ok(Self::sqlite(DbConfig::new(path)).await?)
            }
            StorageBackend::Memory => Ok(AppSink::Memory(MemorySink::new())),
        }
    }

    pub async fn sqlite(db_config: DbConfig) -> DbResult<Self> {
        let db = Database::new(db_config).await?;
        Ok(AppSink::Sqlite(SqliteSnapshotSink::new(db)))
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            AppSink::Sqlite(_) => StorageBackend::Sqlite,
            AppSink::Memory(_) => StorageBackend::Memory,
        }
    }
}

impl AppSink {
    /// Reports health, migrations and stored snapshot names.
    pub async fn status(&self) -> DbResult<StorageStatus> {
        match self {
            AppSink::Sqlite(sink) => {
                let db = sink.database();
                if !db.health_check().await {
                    return Ok(StorageStatus {
                        backend: StorageBackend::Sqlite,
                        healthy: false,
                        migrations: None,
                        snapshots: Vec::new(),
                    });
                }

                let (total, applied) = migration_status(db.pool()).await?;
                Ok(StorageStatus {
                    backend: StorageBackend::Sqlite,
                    healthy: true,
                    migrations: Some((applied, total)),
                    snapshots: db.snapshots().list_names().await?,
                })
            }
            AppSink::Memory(sink) => Ok(StorageStatus {
                backend: StorageBackend::Memory,
                healthy: true,
                migrations: None,
                snapshots: sink.names(),
            }),
        }
    }
}

impl SnapshotSink for AppSink {
    async fn load(&self, name: &str) -> PersistResult<Option<StoreState>> {
        match self {
            AppSink::Sqlite(sink) => sink.load(name).await,
            AppSink::Memory(sink) => sink.load(name).await,
        }
    }

    async fn persist(&self, name: &str, state: &StoreState) -> PersistResult<()> {
        match self {
            AppSink::Sqlite(sink) => sink.persist(name, state).await,
            AppSink::Memory(sink) => sink.persist(name, state).await,
        }
    }
}
