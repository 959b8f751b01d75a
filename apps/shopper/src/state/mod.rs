//! # State Module
//!
//! ```text
//! SessionState
//! ├── store: Arc<Mutex<ShoppingStateStore<AppSink>>>
//! │                                        └── Sqlite | Memory
//! ├── catalog: Arc<Catalog>
//! └── default_sort
//! ```

mod session;
mod sink;

pub use session::SessionState;
pub use sink::{AppSink, StorageStatus};
