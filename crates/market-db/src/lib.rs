//! # market-db: SQLite Persistence for the Marketplace
//!
//! Stores shopping-state snapshots in SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Snapshot Data Flow                               │
//! │                                                                         │
//! │  ShoppingStateStore mutation (market-core)                              │
//! │       │ SnapshotSink::persist                                           │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     market-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (snapshot.rs) │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────▲───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                     SqliteSnapshotSink (sink.rs)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │        <platform data dir>/shopper.db, table store_snapshots    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market_core::{ShoppingStateStore, STORE_NAME};
//! use market_db::{Database, DbConfig, SqliteSnapshotSink};
//!
//! let db = Database::new(DbConfig::new("shopper.db")).await?;
//! let store = ShoppingStateStore::open(STORE_NAME, SqliteSnapshotSink::new(db)).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sink;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::{SnapshotRecord, SnapshotRepository};
pub use sink::SqliteSnapshotSink;
