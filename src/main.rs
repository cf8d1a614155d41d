//! Main entry point for the ordination application.
//!
//! Seeds the in-memory store with the demo data set and serves the REST API
//! (with OpenAPI/Swagger documentation) on the configured address.

use std::sync::Arc;

use ordination_core::{seed_demo_data, OrdinationService, OrdinationStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Starts the ordination REST server.
///
/// # Environment Variables
/// - `ORDINATION_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `RUST_LOG`: tracing filter directives
///
/// # Errors
/// Returns an error if the tracing configuration cannot be initialised, the
/// demo data cannot be seeded, or the HTTP server fails to bind or run.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ordination=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ORDINATION_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting ordination service on {}", rest_addr);

    let store = Arc::new(OrdinationStore::new());
    seed_demo_data(&store).map_err(|e| anyhow::anyhow!("seeding demo data failed: {e}"))?;

    let app = api_rest::app(OrdinationService::new(store));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
