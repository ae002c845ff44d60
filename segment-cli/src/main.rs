//! segment-service - HTTP service for segments and their assignment to users
//!
//! Loads `.env` if present, reads storage settings from `STORAGE_*`
//! variables, and serves the segment API until Ctrl+C or SIGTERM.

use anyhow::Result;
use clap::Parser;

mod serve;
mod tracing_setup;

use serve::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "segment-service",
    author,
    version,
    about = "Segment service: named user cohorts with random percentage assignment"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    serve::run_serve(cli.serve).await
}
