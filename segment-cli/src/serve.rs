//! Serve command - startup sequence for the segment service
//!
//! Config → pool (pinged) → migrations → HTTP server → pool close.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use segment_server::db::{create_pool, migrate, DEFAULT_MAX_CONNECTIONS};
use segment_server::http::server::DEFAULT_REQUEST_TIMEOUT_SECS;
use segment_server::{run_server, AppState, ServerConfig, StorageConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SEGMENT_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Maximum number of pooled database connections
    #[arg(long, env = "SEGMENT_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "SEGMENT_REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    /// Do not apply schema migrations at startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server until shutdown
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let storage = StorageConfig::from_env().context("Invalid storage configuration")?;
    tracing::debug!(?storage, "storage config loaded");

    let pool = create_pool(&storage, args.max_connections)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {} at {}:{}",
                storage.database, storage.host, storage.port
            )
        })?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else if let Err(e) = migrate(&pool).await {
        pool.close().await;
        return Err(e).context("Failed to apply migrations");
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    tracing::info!("Starting segment service on {}", config.bind_addr);
    let result = run_server(AppState::new(pool.clone()), config).await;

    pool.close().await;
    tracing::info!("Database pool closed");

    result.context("Server error")
}
