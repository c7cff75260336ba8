//! HTTP API for cost estimates, recommendations, health and metrics

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use optimizer_engine::{
    health::ComponentStatus, input::params, CostBreakdown, Engine, EngineMetrics, Evaluation,
    HealthRegistry, PricingConfig, Recommendation, SimulatedResource, StructuredLogger,
    UsageDefaults, UsageInput,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub defaults: UsageDefaults,
    pub health_registry: HealthRegistry,
    pub metrics: EngineMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        engine: Engine,
        defaults: UsageDefaults,
        health_registry: HealthRegistry,
        metrics: EngineMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            engine,
            defaults,
            health_registry,
            metrics,
            logger,
        }
    }

    /// Turn raw query parameters into engine input, recording fields that
    /// fell back to defaults
    fn parse_usage(&self, query: &HashMap<String, String>) -> UsageInput {
        let parsed = UsageInput::from_params(query, &self.defaults);

        if !parsed.defaulted.is_empty() {
            self.logger.log_input_defaulted(&parsed.defaulted);
            for field in &parsed.defaulted {
                self.metrics.inc_defaulted_input(field);
            }
        }

        parsed.input
    }

    /// Like [`Self::parse_usage`], also recording an unknown provider
    fn usage_input(&self, query: &HashMap<String, String>) -> UsageInput {
        let input = self.parse_usage(query);

        let resolved = self.engine.pricing().resolve(&input.provider);
        if resolved.fallback {
            self.logger.log_provider_fallback(&input.provider, resolved.name);
            self.metrics.inc_provider_fallbacks();
        }

        input
    }

    fn evaluate(&self, input: &UsageInput) -> Evaluation {
        let start = Instant::now();
        let evaluation = self.engine.evaluate(input);
        let elapsed = start.elapsed().as_secs_f64();

        self.metrics.observe_evaluation_latency(elapsed);
        self.metrics.record_evaluation(&evaluation);
        self.logger.log_evaluation(&evaluation, elapsed);

        evaluation
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub savings_percent: f64,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct ResourceListResponse {
    pub resources: Vec<SimulatedResource>,
    pub total_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendationListResponse {
    pub recommendations: Vec<Recommendation>,
    pub total_savings: f64,
}

#[derive(Debug, Serialize)]
pub struct BestProviderResponse {
    pub best: CostBreakdown,
    pub comparison: Vec<CostBreakdown>,
}

/// Health check - 200 if healthy or degraded, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check - 200 if ready, 503 otherwise
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            Vec::new(),
        );
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

async fn evaluate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<EvaluateResponse> {
    let input = state.usage_input(&query);
    let evaluation = state.evaluate(&input);

    Json(EvaluateResponse {
        savings_percent: evaluation.savings_percent(),
        evaluation,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

async fn costs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<CostBreakdown> {
    let input = state.usage_input(&query);
    Json(state.engine.calculate(&input))
}

async fn resources(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<ResourceListResponse> {
    let input = state.usage_input(&query);
    let evaluation = state.evaluate(&input);

    Json(ResourceListResponse {
        resources: evaluation.resources,
        total_cost: evaluation.total_cost,
    })
}

async fn list_recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<RecommendationListResponse> {
    let input = state.usage_input(&query);
    let evaluation = state.evaluate(&input);

    Json(RecommendationListResponse {
        recommendations: evaluation.recommendations,
        total_savings: evaluation.total_savings,
    })
}

/// Recommendation for a single caller-supplied resource
async fn recommend_resource(
    State(state): State<Arc<AppState>>,
    Json(resource): Json<SimulatedResource>,
) -> Json<Recommendation> {
    Json(state.engine.recommend(&resource))
}

async fn best_provider(
    State(state): State<Arc<AppState>>,
    Query(mut query): Query<HashMap<String, String>>,
) -> Json<BestProviderResponse> {
    // Every provider is compared; a requested one plays no part
    query.remove(params::PROVIDER);
    let input = state.parse_usage(&query);

    Json(BestProviderResponse {
        best: state.engine.find_best(&input),
        comparison: state.engine.compare_providers(&input),
    })
}

async fn providers(State(state): State<Arc<AppState>>) -> Json<PricingConfig> {
    Json(PricingConfig::from(state.engine.pricing()))
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/evaluate", get(evaluate))
        .route("/api/v1/costs", get(costs))
        .route("/api/v1/resources", get(resources))
        .route(
            "/api/v1/recommendations",
            get(list_recommendations).post(recommend_resource),
        )
        .route("/api/v1/best-provider", get(best_provider))
        .route("/api/v1/providers", get(providers))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
