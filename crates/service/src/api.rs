//! HTTP API: Lambda-style invocation, health checks, Prometheus metrics

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use service_lib::{
    health::{ComponentStatus, HealthRegistry},
    models::EventBatch,
    observability::{ServiceMetrics, StructuredLogger},
    PredictionAdapter,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<PredictionAdapter>,
    pub health_registry: HealthRegistry,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        adapter: Arc<PredictionAdapter>,
        health_registry: HealthRegistry,
        metrics: ServiceMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            adapter,
            health_registry,
            metrics,
            logger,
        }
    }
}

/// Invocation endpoint: processes one event batch synchronously
///
/// Any failure (decode, prediction, delivery) fails the whole batch with a
/// 500; retries and dead-lettering belong to the supervising runtime.
async fn invoke(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<EventBatch>,
) -> impl IntoResponse {
    let start = Instant::now();
    state.metrics.inc_invocations();
    state.metrics.observe_batch_size(batch.records.len());

    match state.adapter.handle_batch(&batch) {
        Ok(response) => {
            state
                .metrics
                .observe_batch_latency(start.elapsed().as_secs_f64());
            state
                .metrics
                .add_prediction_events(response.prediction_events.len() as u64);
            for event in &response.prediction_events {
                state.logger.log_prediction(
                    &event.prediction.ride_id,
                    event.prediction.ride_duration,
                    event.version.as_deref(),
                );
            }
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let error = format!("{e:#}");
            state.metrics.inc_invocation_errors();
            state
                .logger
                .log_invocation_error(batch.records.len(), &error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": error })),
            )
                .into_response()
        }
    }
}

/// Health check: 200 while at least degraded, 503 when unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check: 200 once initialized and no component is unhealthy
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
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
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
