//! # Shopper Library
//!
//! Wires the marketplace shopping store into a running session: config,
//! logging, snapshot storage, the product catalog and the boundary commands.
//!
//! ## Module Organization
//! ```text
//! shopper/
//! ├── lib.rs          ◄─── You are here (tracing & bootstrap)
//! ├── config.rs       ◄─── shopper.toml + SHOPPER_* overrides
//! ├── catalog.rs      ◄─── Read-only product list
//! ├── state/
//! │   ├── session.rs  ◄─── SessionState (store behind a Mutex)
//! │   └── sink.rs     ◄─── AppSink (SQLite or memory)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request + dispatch
//! │   ├── cart.rs     ◄─── Cart & checkout quote
//! │   ├── wishlist.rs ◄─── Wishlist toggle
//! │   ├── catalog.rs  ◄─── Browse, filters, search, history
//! │   ├── user.rs     ◄─── Sign in / out
//! │   ├── profile.rs  ◄─── Addresses, payment methods, preferences
//! │   └── storage.rs  ◄─── Storage diagnostics
//! └── error.rs        ◄─── ApiError returned by commands
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use config::{AppConfig, LoggingSettings};
use error::ApiError;
use state::{AppSink, SessionState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries command responses.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - Otherwise `[logging] filter` from the config
///   (default `info,market=debug,shopper=debug,sqlx=warn`)
pub fn init_tracing(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the session described by `config`.
///
/// ## Startup Sequence
/// ```text
/// 1. Load catalog ────── [catalog] path, empty when unset
/// 2. Open storage ────── SQLite file (migrations run) or memory
/// 3. Rehydrate store ─── snapshot `store_name`, defaults when missing
///                        or unreadable
/// ```
pub async fn bootstrap(config: &AppConfig) -> Result<SessionState, ApiError> {
    let catalog = match &config.catalog.path {
        Some(path) => Catalog::load(path)?,
        None => {
            warn!("No catalog configured, browsing will show no products");
            Catalog::default()
        }
    };

    let sink = AppSink::open(config).await?;
    info!(backend = %sink.backend(), "Snapshot storage opened");

    Ok(SessionState::open(
        config.storage.store_name.clone(),
        sink,
        catalog,
        config.catalog.default_sort,
    )
    .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_bootstrap_memory_without_catalog() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let session = bootstrap(&config).await.unwrap();

        assert!(session.catalog().is_empty());
        let store = session.store().await;
        assert_eq!(store.name(), config.storage.store_name);
        assert!(store.state().cart().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_missing_catalog_file() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.catalog.path = Some("/nonexistent/catalog.json".into());

        let err = bootstrap(&config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[tokio::test]
    async fn test_bootstrap_sqlite_survives_restart() {
        let path = std::env::temp_dir().join(format!("shopper-{}.db", uuid::Uuid::new_v4()));
        let mut config = AppConfig::default();
        config.storage.database_path = Some(path.clone());

        {
            let session = bootstrap(&config).await.unwrap();
            let mut store = session.store().await;
            assert!(store.set_search_query("lamp").await.is_persisted());
        }

        let session = bootstrap(&config).await.unwrap();
        assert_eq!(session.store().await.state().search_query(), "lamp");

        let _ = std::fs::remove_file(&path);
    }
}
