//! # Shopper Configuration
//!
//! Configuration for the shopping session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Load Order (later overrides earlier)                    │
//! │                                                                         │
//! │  1. Defaults           AppConfig::default()                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. shopper.toml       explicit path, or <platform config dir>          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  3. Environment        SHOPPER_STORAGE, SHOPPER_DB_PATH,                │
//! │        │               SHOPPER_STORE_NAME, SHOPPER_CATALOG_PATH,        │
//! │        │               SHOPPER_SORT                                     │
//! │        ▼                                                                │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopper.toml
//! [storage]
//! backend = "sqlite"          # sqlite | memory
//! database_path = "/var/lib/shopper/shopper.db"
//! store_name = "marketplace-store"
//!
//! [catalog]
//! path = "catalog.json"
//! default_sort = "rating"     # rating | price
//!
//! [logging]
//! filter = "info,market=debug,sqlx=warn"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use market_core::{SortKey, STORE_NAME};

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No explicit path given and the platform directories are unknown.
    #[error("No config path available")]
    NoPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Storage Backend
// =============================================================================

/// Where snapshots go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// SQLite file, survives restarts.
    #[default]
    Sqlite,

    /// Process memory only; state is gone on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "db" => Ok(StorageBackend::Sqlite),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid(format!(
                "Unknown storage backend: '{}'. Valid options: sqlite, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite file. Default: `shopper.db` in the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Snapshot key.
    #[serde(default = "default_store_name")]
    pub store_name: String,
}

fn default_store_name() -> String {
    STORE_NAME.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            database_path: None,
            store_name: default_store_name(),
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file with the product list. No path means an empty catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Sort used when a browse command does not name one.
    #[serde(default)]
    pub default_sort: SortKey,
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives. `RUST_LOG` wins over this when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,market=debug,shopper=debug,sqlx=warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete shopper configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from defaults, file and environment, then
    /// validates it.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shopper config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shopper config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Shopper config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.store_name must not be empty".into()));
        }

        if let Some(ref path) = self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("storage.database_path must not be empty".into()));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process environment in
    /// production, a map in tests).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("SHOPPER_STORAGE") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(_) => warn!(backend = %backend, "Unknown storage backend in environment"),
            }
        }

        if let Some(path) = lookup("SHOPPER_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("SHOPPER_STORE_NAME") {
            self.storage.store_name = name;
        }

        if let Some(path) = lookup("SHOPPER_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(sort) = lookup("SHOPPER_SORT") {
            match sort.parse() {
                Ok(parsed) => self.catalog.default_sort = parsed,
                Err(_) => warn!(sort = %sort, "Unknown sort key in environment"),
            }
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "marketplace", "shopper")
    }

    /// `<platform config dir>/shopper.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("shopper.toml"))
    }

    /// Resolves the SQLite file: the configured path, else `shopper.db` in
    /// the platform data directory (created if missing).
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(ref path) = self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs().ok_or(ConfigError::NoPath)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("shopper.db"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.store_name, "marketplace-store");
        assert_eq!(config.catalog.default_sort, SortKey::Rating);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("sqlite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("MEMORY".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [storage]
            backend = "memory"

            [catalog]
            default_sort = "price"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.store_name, "marketplace-store");
        assert_eq!(config.catalog.default_sort, SortKey::Price);
        assert_eq!(config.logging.filter, default_log_filter());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[
            ("SHOPPER_STORAGE", "memory"),
            ("SHOPPER_DB_PATH", "/tmp/x.db"),
            ("SHOPPER_STORE_NAME", "kiosk"),
            ("SHOPPER_CATALOG_PATH", "/tmp/catalog.json"),
            ("SHOPPER_SORT", "price"),
        ]));

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.database_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(config.storage.store_name, "kiosk");
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.catalog.default_sort, SortKey::Price);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[("SHOPPER_STORAGE", "redis"), ("SHOPPER_SORT", "newest")]));

        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.catalog.default_sort, SortKey::Rating);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.storage.store_name = "  ".to_string();
        assert!(config.validate().is_err());

        config.storage.store_name = "ok".to_string();
        config.logging.filter = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let mut config = AppConfig::default();
        config.storage.database_path = Some(PathBuf::from("/data/shop.db"));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/data/shop.db"));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[logging]"));
    }
}
