//! CloudOptimizer - multi-cloud cost estimation service
//!
//! Serves cost breakdowns, cheapest-provider comparisons and rule-based
//! optimization suggestions as JSON.

use anyhow::Result;
use cloud_optimizer::{api, config, load_pricing};
use optimizer_engine::{
    health::components, Engine, EngineMetrics, HealthRegistry, StructuredLogger,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_NAME: &str = "cloud-optimizer";
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting cloud-optimizer");

    let config = config::ServiceConfig::load()?;
    info!(port = config.api_port, pricing_file = ?config.pricing_file, "Service configured");

    let health_registry = HealthRegistry::new();
    let logger = StructuredLogger::new(SERVICE_NAME);
    let metrics = EngineMetrics::new();

    let pricing = load_pricing(&config, &health_registry, &logger).await;
    let engine = Engine::new(pricing);
    health_registry.register(components::ENGINE).await;

    logger.log_startup(SERVICE_VERSION, config.api_port, engine.pricing().len());

    let app_state = Arc::new(api::AppState::new(
        engine,
        config.usage_defaults(),
        health_registry.clone(),
        metrics,
        logger.clone(),
    ));

    health_registry.set_ready(true).await;

    let server = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::select! {
        result = server => {
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            logger.log_shutdown("SIGINT received");
        }
    }

    info!("Shutting down");
    Ok(())
}
