//! Contact Desk server
//!
//! Serves the in-memory contact service over JSON for the contact UI.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contact_desk::config::Config;
use contact_desk::service::InMemoryContactService;
use contact_desk::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Contact Desk");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        "Simulated latency: read {:?}, write {:?}",
        config.latency.read,
        config.latency.write
    );

    let service = if config.seed_contacts {
        InMemoryContactService::seeded(config.latency)
    } else {
        InMemoryContactService::new(config.latency)
    };
    if service.is_empty().await {
        tracing::warn!("Contact service starts empty");
    } else {
        tracing::info!("Contact service holds {} contacts", service.len().await);
    }

    let state = AppState {
        service: Arc::new(service),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
