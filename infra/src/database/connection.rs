//! MySQL connection pool management.

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use sn_core::errors::DomainError;
use sn_shared::config::DatabaseConfig;

/// Managed MySQL connection pool
///
/// Cheap to clone; all clones share the underlying pool.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect to the database described by the configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to connect to database: {e}"),
            })?;

        info!(
            max_connections = config.max_connections,
            "database pool established"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool, mainly for tests and tooling
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The underlying SQLx pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verify the database is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::ServiceUnavailable {
                message: format!("Database ping failed: {e}"),
            })
    }

    /// Close all connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
