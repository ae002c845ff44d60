//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing and timeout
//! - Graceful shutdown
//! - JSON error responses, store details kept in server logs

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
