//! CloudOptimizer pricing service
//!
//! Serves the cost engine over HTTP. Query parameters are parsed with
//! fallback defaults, so usage endpoints never reject a request.

pub mod api;
pub mod config;

use optimizer_engine::health::components;
use optimizer_engine::{HealthRegistry, PricingConfig, PricingTable, StructuredLogger};
use std::sync::Arc;

/// Load the pricing table named by the configuration.
///
/// A missing or invalid pricing file degrades the pricing component and
/// falls back to the built-in rates.
pub async fn load_pricing(
    config: &config::ServiceConfig,
    health: &HealthRegistry,
    logger: &StructuredLogger,
) -> Arc<PricingTable> {
    let Some(path) = config.pricing_file.as_deref() else {
        let table = PricingTable::default();
        logger.log_pricing_loaded("builtin", table.len(), table.default_provider());
        health.register(components::PRICING).await;
        return Arc::new(table);
    };

    match PricingConfig::load(path).and_then(|c| c.build()) {
        Ok(table) => {
            logger.log_pricing_loaded(path, table.len(), table.default_provider());
            health.register(components::PRICING).await;
            Arc::new(table)
        }
        Err(e) => {
            logger.log_pricing_fallback(path, &e.to_string());
            health
                .set_degraded(
                    components::PRICING,
                    format!("Using built-in rates: {}", e),
                )
                .await;
            Arc::new(PricingTable::default())
        }
    }
}
