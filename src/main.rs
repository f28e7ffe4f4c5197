//! Relay server binary.
//!
//! Reads `KIE_API_KEY` (and optional `KIE_BASE_URL`,
//! `VIDRELAY_BIND_ADDR`) from the environment, then serves the relay
//! API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vidrelay::config::RelayConfig;
use vidrelay::providers::kie::{KieClient, RetryOptions};
use vidrelay::server::build_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env()?;
    config.validate()?;

    let service = Arc::new(
        KieClient::new(config.clone(), reqwest::Client::new())
            .with_retry(RetryOptions::default()),
    );
    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
