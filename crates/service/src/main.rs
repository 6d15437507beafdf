//! Ride duration prediction service
//!
//! Accepts Lambda-style event batches over HTTP, runs the prediction
//! adapter, and forwards prediction events toward the configured stream.

use anyhow::Result;
use service_lib::{
    delivery::{ChannelCallback, DeliveryCallback, OutboundRecord},
    health::{components, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    HeuristicPredictor, PredictionAdapter,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting prediction-service");

    // Load configuration
    let config = config::ServiceConfig::load()?;
    info!(
        stream = %config.predictions_stream_name,
        test_run = config.test_run,
        "Service configured"
    );

    match config.model_location() {
        Some(location) => info!(model_location = %location, "Model artifact location resolved"),
        None => info!("No run id configured; serving heuristic predictions"),
    }

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::PREDICTOR).await;

    // Initialize metrics
    let metrics = ServiceMetrics::new();
    metrics.set_model_version(config.run_id.as_deref().unwrap_or("none"));

    // Initialize structured logger
    let logger = StructuredLogger::new(&config.predictions_stream_name);
    logger.log_startup(SERVICE_VERSION, config.run_id.as_deref());

    // Wire delivery callbacks. Test runs skip the stream callback so
    // nothing is forwarded downstream.
    let mut callbacks: Vec<Box<dyn DeliveryCallback>> = Vec::new();
    let mut delivery_rx = None;
    if !config.test_run {
        let (tx, rx) = mpsc::channel::<OutboundRecord>(config.delivery_queue_capacity);
        callbacks.push(Box::new(ChannelCallback::new(tx)));
        delivery_rx = Some(rx);
        health_registry.register(components::DELIVERY).await;
    }

    // Build the prediction adapter
    let mut builder = PredictionAdapter::builder()
        .predictor(Arc::new(HeuristicPredictor::new()))
        .callbacks(callbacks);
    if let Some(run_id) = &config.run_id {
        builder = builder.model_version(run_id);
    }
    let adapter = Arc::new(builder.build()?);

    // Drain the delivery channel toward the stream transport
    if let Some(rx) = delivery_rx {
        spawn_delivery_forwarder(
            rx,
            logger.clone(),
            metrics.clone(),
            health_registry.clone(),
        );
    }

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        adapter,
        health_registry.clone(),
        metrics.clone(),
        logger.clone(),
    ));

    // Mark service as ready after initialization
    health_registry.set_ready(true).await;

    // Start the API server
    let _api_handle = tokio::spawn(api::serve(config.http_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}

/// Forward outbound records to the stream transport
///
/// The receiving end of the delivery channel is the boundary owned by the
/// messaging collaborator; this forwarder accounts for and logs each
/// record crossing it.
fn spawn_delivery_forwarder(
    mut rx: mpsc::Receiver<OutboundRecord>,
    logger: StructuredLogger,
    metrics: ServiceMetrics,
    health_registry: HealthRegistry,
) {
    tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            metrics.inc_deliveries();
            logger.log_delivery(&record.partition_key, record.data.len());
        }

        // All senders dropped: nothing will be forwarded anymore.
        logger.log_delivery_stopped();
        health_registry
            .set_unhealthy(components::DELIVERY, "delivery channel closed")
            .await;
    });
}
