//! Integration tests for the pricing API endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cloud_optimizer::api::{create_router, AppState};
use optimizer_engine::{
    health::components, Engine, EngineMetrics, HealthRegistry, StructuredLogger, UsageDefaults,
};
use std::sync::Arc;
use tower::ServiceExt;

async fn setup_test_app() -> (Router, Arc<AppState>) {
    let health_registry = HealthRegistry::new();
    health_registry.register(components::PRICING).await;
    health_registry.register(components::ENGINE).await;

    let state = Arc::new(AppState::new(
        Engine::default(),
        UsageDefaults::default(),
        health_registry,
        EngineMetrics::new(),
        StructuredLogger::new("test"),
    ));
    let router = create_router(state.clone());

    (router, state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}

fn approx(value: &serde_json::Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-9
}

#[tokio::test]
async fn test_healthz_returns_ok_when_healthy() {
    let (app, _state) = setup_test_app().await;
    let (status, health) = get_json(app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert!(health["components"]["pricing"].is_object());
    assert!(health["components"]["engine"].is_object());
}

#[tokio::test]
async fn test_healthz_returns_ok_when_pricing_degraded() {
    let (app, state) = setup_test_app().await;
    state
        .health_registry
        .set_degraded(components::PRICING, "Using built-in rates")
        .await;

    let (status, health) = get_json(app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "degraded");
}

#[tokio::test]
async fn test_healthz_returns_503_when_unhealthy() {
    let (app, state) = setup_test_app().await;
    state
        .health_registry
        .set_unhealthy(components::ENGINE, "broken")
        .await;

    let (status, health) = get_json(app, "/healthz").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health["status"], "unhealthy");
}

#[tokio::test]
async fn test_readyz_follows_ready_flag() {
    let (app, state) = setup_test_app().await;
    let (status, readiness) = get_json(app.clone(), "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(readiness["ready"], false);

    state.health_registry.set_ready(true).await;
    let (status, readiness) = get_json(app, "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(readiness["ready"], true);
}

#[tokio::test]
async fn test_evaluate_aws_baseline() {
    let (app, _state) = setup_test_app().await;
    let (status, body) = get_json(
        app,
        "/api/v1/evaluate?provider=AWS&vm_hours=744&storage_gb=100&network_gb=50",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["breakdown"]["vm_cost"], 37.2));
    assert!(approx(&body["breakdown"]["storage_cost"], 1.0));
    assert!(approx(&body["breakdown"]["network_cost"], 1.0));
    assert!(approx(&body["breakdown"]["total"], 39.2));
    assert!(approx(&body["total_cost"], 39.2));
    assert_eq!(body["resources"].as_array().unwrap().len(), 3);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(body["resources"][0]["resource_type"], "VM");
    assert!(body["generated_at"].is_string());
    assert!(body["savings_percent"].is_number());
}

#[tokio::test]
async fn test_evaluate_without_params_uses_defaults() {
    let (app, _state) = setup_test_app().await;
    let (status, body) = get_json(app, "/api/v1/evaluate").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breakdown"]["provider"], "AWS");
    assert!(approx(&body["breakdown"]["vm_hours"], 744.0));
    assert!(approx(&body["breakdown"]["storage_gb"], 100.0));
    assert!(approx(&body["breakdown"]["network_gb"], 50.0));
}

#[tokio::test]
async fn test_unparseable_params_fall_back_to_defaults() {
    let (app, _state) = setup_test_app().await;
    let (status, body) = get_json(
        app,
        "/api/v1/costs?vm_hours=abc&storage_gb=-10&network_gb=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["vm_hours"], 744.0));
    assert!(approx(&body["storage_gb"], 100.0));
    assert!(approx(&body["network_gb"], 50.0));
    assert!(approx(&body["total"], 39.2));
}

#[tokio::test]
async fn test_unknown_provider_priced_as_aws() {
    let (app, _state) = setup_test_app().await;
    let (status, body) = get_json(app, "/api/v1/costs?provider=Oracle&vm_hours=100").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "AWS");
    assert!(approx(&body["vm_cost"], 5.0));
}

#[tokio::test]
async fn test_camel_case_params_accepted() {
    let (app, _state) = setup_test_app().await;
    let (_, body) = get_json(
        app,
        "/api/v1/costs?provider=Azure&vmHours=100&storageGB=0&networkGB=0",
    )
    .await;

    assert_eq!(body["provider"], "Azure");
    assert!(approx(&body["vm_hours"], 100.0));
}

#[tokio::test]
async fn test_resources_empty_for_zero_usage() {
    let (app, _state) = setup_test_app().await;
    let (status, body) =
        get_json(app, "/api/v1/resources?vm_hours=0&storage_gb=0&network_gb=0").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["resources"].as_array().unwrap().is_empty());
    assert!(approx(&body["total_cost"], 0.0));
}

#[tokio::test]
async fn test_recommendations_list_totals_savings() {
    let (app, _state) = setup_test_app().await;
    let (status, body) = get_json(
        app,
        "/api/v1/recommendations?provider=AWS&vm_hours=100&storage_gb=20&network_gb=0",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["confidence_tier"], "High");
    assert!(approx(&body["total_savings"], 2.06));
}

#[tokio::test]
async fn test_recommend_underutilized_vm() {
    let (app, _state) = setup_test_app().await;
    let payload = serde_json::json!({
        "id": "vm-42",
        "resource_type": "VM",
        "cpu_usage_pct": 8.5,
        "memory_usage_pct": 20.0,
        "storage_usage_pct": 0.0,
        "cost_per_month": 120.0
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/recommendations")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let rec: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(rec["resource_id"], "vm-42");
    assert_eq!(rec["confidence_tier"], "High");
    assert!(approx(&rec["potential_savings"], 84.0));
}

#[tokio::test]
async fn test_recommend_unknown_resource_type() {
    let (app, _state) = setup_test_app().await;
    let payload = serde_json::json!({
        "id": "db-1",
        "resource_type": "Database",
        "cost_per_month": 300.0
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/recommendations")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let rec: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(rec["text"], "Manual review recommended");
    assert_eq!(rec["confidence_tier"], "Low");
    assert!(approx(&rec["potential_savings"], 0.0));
}

#[tokio::test]
async fn test_recommend_rejects_malformed_body() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/recommendations")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_best_provider_selection() {
    let (app, _state) = setup_test_app().await;
    let (status, body) = get_json(
        app,
        "/api/v1/best-provider?vm_hours=100&storage_gb=500&network_gb=100",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["best"]["provider"], "AWS");
    assert!(approx(&body["best"]["total"], 12.0));

    let comparison = body["comparison"].as_array().unwrap();
    assert_eq!(comparison.len(), 3);
    for entry in comparison {
        assert!(entry["total"].as_f64().unwrap() >= 12.0 - 1e-9);
    }
}

#[tokio::test]
async fn test_providers_lists_rate_table() {
    let (app, _state) = setup_test_app().await;
    let (status, body) = get_json(app, "/api/v1/providers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["default_provider"], "AWS");
    let providers = body["providers"].as_array().unwrap();
    let names: Vec<_> = providers.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["AWS", "Azure", "Google"]);
    assert_eq!(providers[2]["aliases"][0], "GCP");
}

#[tokio::test]
async fn test_metrics_endpoint_returns_prometheus_format() {
    let (app, _state) = setup_test_app().await;

    // Produce at least one evaluation so the counters exist
    let _ = get_json(app.clone(), "/api/v1/evaluate?provider=Nope").await;

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let metrics_text = String::from_utf8(body.to_vec()).unwrap();

    assert!(metrics_text.contains("cloud_optimizer_evaluations_total"));
    assert!(metrics_text.contains("cloud_optimizer_evaluation_latency_seconds_bucket"));
    assert!(metrics_text.contains("cloud_optimizer_provider_fallbacks_total"));
}
