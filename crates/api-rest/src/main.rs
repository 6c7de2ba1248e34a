//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `intake-run` binary serves the same
//! router after loading a `.env` file.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_core::CoreConfig;

/// Main entry point for the intake REST API server
///
/// # Environment Variables
/// - `INTAKE_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `INTAKE_MAX_ENTRIES`: Maximum raw entries per request (default: 256)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(CoreConfig::from_env()?);
    let addr = cfg.rest_addr();

    tracing::info!("-- Starting intake REST API on {}", addr);

    let app = api_rest::router(cfg);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
