//! MySQL pool and the startup schema
//!
//! The only table Gohub reads is `users`; `migrate` creates it when it is
//! missing and leaves an existing table untouched.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

use hub_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Statements run in order by [`DatabasePool::migrate`]
const MIGRATIONS: &[(&str, &str)] = &[(
    "create_users_table",
    r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
    name VARCHAR(255) NOT NULL DEFAULT '',
    email VARCHAR(255) NULL,
    phone VARCHAR(32) NULL,
    password VARCHAR(255) NOT NULL DEFAULT '',
    created_at DATETIME(3) NULL,
    updated_at DATETIME(3) NULL,
    PRIMARY KEY (id),
    INDEX idx_users_email (email),
    INDEX idx_users_phone (phone),
    INDEX idx_users_created_at (created_at),
    INDEX idx_users_updated_at (updated_at)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#,
)];

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    let max = config.max_connections.max(1);
    MySqlPoolOptions::new()
        .max_connections(max)
        .min_connections(config.min_connections.min(max))
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .test_before_acquire(true)
}

/// Shared handle over the SQLx pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = pool_options(config).connect_with(options).await.map_err(|e| {
            tracing::error!(error = %e, "MySQL connection failed");
            InfrastructureError::Database(e)
        })?;

        let db = Self { pool };
        tracing::info!(pool = %db.statistics(), "MySQL pool connected");
        Ok(db)
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Apply every statement in [`MIGRATIONS`]; safe to run repeatedly
    pub async fn migrate(&self) -> Result<(), InfrastructureError> {
        for (name, statement) in MIGRATIONS {
            sqlx::query(*statement).execute(&self.pool).await?;
            tracing::debug!(migration = *name, "Migration applied");
        }
        tracing::info!(count = MIGRATIONS.len(), "Schema up to date");
        Ok(())
    }

    /// `SELECT 1` round trip
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let (value,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(value == 1)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL pool closed");
    }
}

/// Point-in-time pool usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}

#[cfg(test)]
pub(crate) fn migration_names() -> Vec<&'static str> {
    MIGRATIONS.iter().map(|(name, _)| *name).collect()
}
