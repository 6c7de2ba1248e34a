use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_core::{AliasTable, CoreConfig};

/// Main entry point for the intake application
///
/// Loads `.env`, resolves configuration once, and serves the REST API
/// (reconciliation, field listing, payload normalisation and Swagger UI).
///
/// # Environment Variables
/// - `INTAKE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `INTAKE_MAX_ENTRIES`: Maximum raw entries accepted per request (default: 256)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(CoreConfig::from_env()?);
    let rest_addr = cfg.rest_addr();

    tracing::info!(
        "++ Starting intake REST on {} (alias table v{} with {} aliases, max {} entries)",
        rest_addr,
        AliasTable::builtin().version(),
        AliasTable::builtin().alias_count(),
        cfg.max_entries()
    );

    let app = api_rest::router(cfg);
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
