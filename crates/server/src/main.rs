//! uptrack server - health-check analytics service
//!
//! Ingests batches of check results over HTTP and serves availability,
//! incident and correlation reports for operations dashboards.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uptrack_core::{
    health::{components, HealthRegistry},
    BatchIngestor, EngineMetrics, MemoryStore, ReportBuilder, StructuredLogger,
};
use uptrack_server::{api, config};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting uptrack-server");

    // Load configuration
    let config = config::ServerConfig::load()?;
    info!(instance = %config.instance, port = config.api_port, "Server configured");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::STORE).await;
    health_registry.register(components::INGEST).await;
    health_registry.register(components::REPORTS).await;

    // Initialize metrics and structured logging
    let metrics = EngineMetrics::new();
    let logger = StructuredLogger::new(&config.instance);
    logger.log_startup(SERVER_VERSION);

    // Composition root: wire the engine onto one in-memory store
    let store = Arc::new(MemoryStore::new());
    let ingestor = Arc::new(BatchIngestor::new(store.clone(), metrics.clone()));
    let reports = Arc::new(
        ReportBuilder::new(store.clone(), metrics.clone())
            .with_fetch_timeout(Duration::from_secs(config.fetch_timeout_secs)),
    );

    let app_state = Arc::new(api::AppState {
        store,
        reports,
        ingestor,
        health_registry: health_registry.clone(),
        metrics,
        logger: logger.clone(),
    });

    // Mark the service as ready after initialization
    health_registry.set_ready(true).await;

    // Serve until interrupted
    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");
    api_handle.abort();

    Ok(())
}
