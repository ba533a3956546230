//! Book Catalog Server
//!
//! REST API for a library's books, backed by MongoDB.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_catalog_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::{BookRepository, MongoBookRepository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Missing store settings are fatal
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting Book Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    let repository = MongoBookRepository::connect(&config.database)
        .await
        .context("Failed to configure document store client")?;

    match repository.ping().await {
        Ok(()) => tracing::info!(
            "Connected to document store (database={}, collection={})",
            config.database.name,
            config.database.collection
        ),
        Err(e) => tracing::warn!("Document store not reachable yet: {}", e),
    }

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(Arc::new(repository))),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("book_catalog_server={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
