//! Database layer - connection pool, migrations and repositories
//!
//! - Bounded pool (3 connections by default), pinged at startup
//! - Multi-statement writes run inside a transaction
//! - Duplicate associations handled with ON CONFLICT, never check-then-insert

pub mod pool;
pub mod repos;

pub use pool::{create_pool, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Apply pending migrations.
pub async fn migrate(pool: &sqlx::PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
