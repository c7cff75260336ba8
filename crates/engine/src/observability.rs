//! Observability for the pricing service
//!
//! Provides:
//! - Prometheus metrics (evaluation counts and latency, recommendation tiers,
//!   provider fallbacks, defaulted inputs, savings distribution)
//! - Structured JSON logging with tracing

use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::models::Evaluation;

/// Histogram buckets for evaluation latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1,
];

/// Histogram buckets for potential monthly savings (in dollars)
const SAVINGS_BUCKETS: &[f64] = &[0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 500.0, 1000.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EngineMetricsInner> = OnceLock::new();

struct EngineMetricsInner {
    evaluations_total: IntCounterVec,
    evaluation_latency_seconds: Histogram,
    recommendations_total: IntCounterVec,
    provider_fallbacks_total: IntCounter,
    defaulted_inputs_total: IntCounterVec,
    potential_savings_dollars: Histogram,
}

impl EngineMetricsInner {
    fn new() -> Self {
        Self {
            evaluations_total: register_int_counter_vec!(
                "cloud_optimizer_evaluations_total",
                "Number of cost evaluations by resolved provider",
                &["provider"]
            )
            .expect("Failed to register evaluations_total"),

            evaluation_latency_seconds: register_histogram!(
                "cloud_optimizer_evaluation_latency_seconds",
                "Time spent evaluating a usage profile",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register evaluation_latency_seconds"),

            recommendations_total: register_int_counter_vec!(
                "cloud_optimizer_recommendations_total",
                "Recommendations generated by confidence tier",
                &["confidence"]
            )
            .expect("Failed to register recommendations_total"),

            provider_fallbacks_total: register_int_counter!(
                "cloud_optimizer_provider_fallbacks_total",
                "Requests naming an unknown provider that were priced at default rates"
            )
            .expect("Failed to register provider_fallbacks_total"),

            defaulted_inputs_total: register_int_counter_vec!(
                "cloud_optimizer_defaulted_inputs_total",
                "Usage parameters replaced by their default value",
                &["field"]
            )
            .expect("Failed to register defaulted_inputs_total"),

            potential_savings_dollars: register_histogram!(
                "cloud_optimizer_potential_savings_dollars",
                "Total potential monthly savings per evaluation",
                SAVINGS_BUCKETS.to_vec()
            )
            .expect("Failed to register potential_savings_dollars"),
        }
    }
}

/// Handle to the process-wide engine metrics.
///
/// Clones share the same underlying Prometheus collectors.
#[derive(Clone)]
pub struct EngineMetrics {
    _private: (),
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EngineMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EngineMetricsInner {
        GLOBAL_METRICS.get_or_init(EngineMetricsInner::new)
    }

    pub fn observe_evaluation_latency(&self, duration_secs: f64) {
        self.inner().evaluation_latency_seconds.observe(duration_secs);
    }

    pub fn inc_evaluations(&self, provider: &str) {
        self.inner()
            .evaluations_total
            .with_label_values(&[provider])
            .inc();
    }

    pub fn inc_provider_fallbacks(&self) {
        self.inner().provider_fallbacks_total.inc();
    }

    /// Requests priced at default rates since startup
    pub fn provider_fallbacks(&self) -> u64 {
        self.inner().provider_fallbacks_total.get()
    }

    pub fn inc_defaulted_input(&self, field: &str) {
        self.inner()
            .defaulted_inputs_total
            .with_label_values(&[field])
            .inc();
    }

    /// Record everything derivable from a finished evaluation
    pub fn record_evaluation(&self, evaluation: &Evaluation) {
        self.inc_evaluations(&evaluation.breakdown.provider);
        for rec in &evaluation.recommendations {
            self.inner()
                .recommendations_total
                .with_label_values(&[rec.confidence_tier.as_str()])
                .inc();
        }
        self.inner()
            .potential_savings_dollars
            .observe(evaluation.total_savings);
    }
}

/// Structured logger for pricing service events
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    pub fn log_startup(&self, version: &str, port: u16, providers: usize) {
        info!(
            event = "service_started",
            service = %self.service_name,
            version = %version,
            port = port,
            providers = providers,
            "Pricing service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service_name,
            reason = %reason,
            "Pricing service shutting down"
        );
    }

    /// Log which pricing table is in use
    pub fn log_pricing_loaded(&self, source: &str, providers: usize, default_provider: &str) {
        info!(
            event = "pricing_loaded",
            service = %self.service_name,
            source = %source,
            providers = providers,
            default_provider = %default_provider,
            "Pricing table loaded"
        );
    }

    pub fn log_pricing_fallback(&self, path: &str, error: &str) {
        warn!(
            event = "pricing_loaded",
            service = %self.service_name,
            source = "builtin",
            path = %path,
            error = %error,
            "Failed to load pricing file, using built-in rates"
        );
    }

    pub fn log_evaluation(&self, evaluation: &Evaluation, duration_secs: f64) {
        info!(
            event = "evaluation_completed",
            service = %self.service_name,
            provider = %evaluation.breakdown.provider,
            vm_hours = evaluation.breakdown.vm_hours,
            storage_gb = evaluation.breakdown.storage_gb,
            network_gb = evaluation.breakdown.network_gb,
            total_cost = evaluation.total_cost,
            total_savings = evaluation.total_savings,
            resources = evaluation.resources.len(),
            duration_secs = duration_secs,
            "Evaluated usage profile"
        );
    }

    pub fn log_provider_fallback(&self, requested: &str, resolved: &str) {
        warn!(
            event = "provider_fallback",
            service = %self.service_name,
            requested = %requested,
            resolved = %resolved,
            "Unknown provider, using default rates"
        );
    }

    pub fn log_input_defaulted(&self, fields: &[&str]) {
        warn!(
            event = "input_defaulted",
            service = %self.service_name,
            fields = ?fields,
            "Invalid usage parameters replaced by defaults"
        );
    }
}
