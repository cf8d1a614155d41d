//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the ordination REST API on its own with a freshly seeded in-memory
//! store. Useful for development and debugging; the workspace's main
//! `ordination-run` binary does the same with env-file support.

use std::sync::Arc;

use ordination_core::{seed_demo_data, OrdinationService, OrdinationStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the ordination REST API server.
///
/// Starts the REST server on the configured address (default: 0.0.0.0:3000)
/// and serves the ordination endpoints with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `ORDINATION_REST_ADDR`: Server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - seeding the demo data fails,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("ordination_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ORDINATION_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting ordination REST API on {}", addr);

    let store = Arc::new(OrdinationStore::new());
    seed_demo_data(&store).map_err(|e| anyhow::anyhow!("seeding demo data failed: {e}"))?;

    let app = api_rest::app(OrdinationService::new(store));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
