//! Store configuration loaded from the environment.
//!
//! | Variable                        | Default            |
//! |---------------------------------|--------------------|
//! | `STOREFRONT_DB_PATH`            | `./storefront.db`  |
//! | `STOREFRONT_DB_MAX_CONNECTIONS` | `5`                |
//! | `STOREFRONT_RUN_MIGRATIONS`     | `true`             |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pool::DbConfig;

/// Storefront storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Pool size.
    pub max_connections: u32,

    /// Apply pending migrations on connect.
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = StoreConfig {
            database_path: lookup("STOREFRONT_DB_PATH")
                .unwrap_or_else(|| "./storefront.db".to_string())
                .into(),

            max_connections: lookup("STOREFRONT_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_DB_MAX_CONNECTIONS".to_string()))?,

            run_migrations: lookup("STOREFRONT_RUN_MIGRATIONS")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_RUN_MIGRATIONS".to_string()))?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "STOREFRONT_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Overrides the database path (e.g. from a `--db` flag).
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Pool configuration for [`crate::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .run_migrations(self.run_migrations)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
