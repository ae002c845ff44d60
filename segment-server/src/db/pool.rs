//! Database connection pool management
//!
//! Uses sqlx PgPool with an explicit connection limit. Requests beyond
//! the limit wait for a free connection.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};

use super::DbError;
use crate::config::StorageConfig;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 3;

/// Create a PostgreSQL connection pool and check the store is reachable.
///
/// # Errors
///
/// Returns an error if no connection can be opened or the ping fails.
/// The pool is closed before a ping failure is returned.
///
/// # Example
///
/// ```ignore
/// let config = StorageConfig::from_env()?;
/// let pool = create_pool(&config, DEFAULT_MAX_CONNECTIONS).await?;
/// ```
pub async fn create_pool(config: &StorageConfig, max_connections: u32) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(config.connect_options())
        .await?;

    if let Err(e) = ping(&pool).await {
        pool.close().await;
        return Err(e);
    }

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections,
        "Connected to database"
    );

    Ok(pool)
}

async fn ping(pool: &PgPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await?;
    conn.ping().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a reachable database configured
    // through the STORAGE_* variables.
    // Run with: cargo test -p segment-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let config = StorageConfig::from_env().expect("config");
        let pool = create_pool(&config, DEFAULT_MAX_CONNECTIONS)
            .await
            .expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
        pool.close().await;
    }

    #[tokio::test]
    async fn unreachable_store_fails_fast() {
        // Nothing listens on port 1
        let config = StorageConfig::from_lookup(|key| match key {
            "STORAGE_HOST" => Some("127.0.0.1".to_owned()),
            "STORAGE_PORT" => Some("1".to_owned()),
            _ => None,
        })
        .unwrap();

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(60),
            create_pool(&config, 1),
        )
        .await
        .expect("connect attempt did not finish");

        assert!(matches!(result, Err(DbError::Sqlx(_))));
    }
}
