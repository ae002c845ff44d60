//! segment-server: HTTP service for segments and user assignment
//!
//! Segments are named cohorts. The service creates, renames and deletes
//! them, assigns a segment to a random percentage of the user population,
//! and lists the segments a user belongs to.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod sampling;

pub use config::{ConfigError, StorageConfig};
pub use db::{create_pool, DbError, MIGRATOR};
pub use http::{build_router, run_server, AppState, ServerConfig};
