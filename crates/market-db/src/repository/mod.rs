//! # Repository Module
//!
//! Repositories wrap the SQL for one table each and are handed out by
//! [`crate::Database`] accessors:
//!
//! ```text
//! db.snapshots().put("marketplace-store", payload)
//!       │
//!       ▼
//! SnapshotRepository
//! ├── get(&self, name)
//! ├── put(&self, name, payload)     upsert
//! └── list_names(&self)
//!       │
//!       ▼
//! store_snapshots table
//! ```

pub mod snapshot;
