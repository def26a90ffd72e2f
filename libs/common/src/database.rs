//! Database module for handling PostgreSQL connections
//!
//! This module provides connection pooling, configuration, and health checks
//! for the PostgreSQL database shared by the auth and api services.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use std::env;
use std::time::Duration;

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool, in seconds
    pub acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `DATABASE_ACQUIRE_TIMEOUT`: acquire timeout in seconds (default: 10)
    ///
    /// A missing `DATABASE_URL` is a fatal configuration error. There is no
    /// fallback connection string and no in-memory substitute.
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::Configuration("DATABASE_URL environment variable not set".to_string())
        })?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let acquire_timeout_seconds = env::var("DATABASE_ACQUIRE_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout_seconds,
        })
    }
}

/// Initialize a PostgreSQL connection pool
///
/// The pool is the single shared persistence resource: it is created once at
/// process start and passed by reference to every repository. Acquisition is
/// bounded by `acquire_timeout_seconds` so a saturated or unreachable
/// database surfaces as an error instead of hanging requests indefinitely.
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.database_url)
        .await
        .map_err(DatabaseError::Connection)?;

    Ok(pool)
}

/// Check database connectivity
pub async fn health_check(pool: &PgPool) -> DatabaseResult<bool> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(DatabaseError::Query)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_database_config_requires_url() {
        unsafe {
            std::env::remove_var("DATABASE_URL");
        }
        let result = DatabaseConfig::from_env();
        assert!(matches!(result, Err(DatabaseError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_database_config_defaults() {
        unsafe {
            std::env::set_var("DATABASE_URL", "postgresql://localhost/gestion_personal");
            std::env::remove_var("DATABASE_MAX_CONNECTIONS");
            std::env::remove_var("DATABASE_ACQUIRE_TIMEOUT");
        }
        let config = DatabaseConfig::from_env().expect("config should load");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_seconds, 10);
        unsafe {
            std::env::remove_var("DATABASE_URL");
        }
    }
}
