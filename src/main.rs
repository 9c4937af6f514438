use anyhow::{Context, Result};
use localized_site::config::Config;
use localized_site::content::{ContentSource, JsonContentSource};
use localized_site::routing::RouteTable;
use localized_site::server::{self, AppState};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_site=info".parse()?),
        )
        .init();

    info!("Starting localized site server");

    let config = Config::from_env()?;
    let table = RouteTable::site().context("Invalid route table")?;
    info!("Loaded {} routes", table.len());

    let entities = match &config.content_file {
        Some(path) => JsonContentSource::new(path).entities().unwrap_or_else(|e| {
            warn!("Content unavailable, sitemap lists static routes only: {:#}", e);
            Vec::new()
        }),
        None => {
            info!("CONTENT_FILE not set, sitemap lists static routes only");
            Vec::new()
        }
    };

    let port = config.port;
    let state = Arc::new(AppState::new(config, table, &entities));
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
