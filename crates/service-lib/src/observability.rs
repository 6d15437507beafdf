//! Observability infrastructure
//!
//! Provides:
//! - Prometheus metrics (invocation latency, batch size, prediction and
//!   delivery counters, model version info)
//! - Structured JSON logging of service events with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram, IntCounter,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Histogram buckets for latency measurements (seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Histogram buckets for batch sizes (records per invocation)
const BATCH_SIZE_BUCKETS: &[f64] = &[1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    batch_latency_seconds: Histogram,
    batch_size_records: Histogram,
    invocations_total: IntCounter,
    invocation_errors_total: IntCounter,
    prediction_events_total: IntCounter,
    deliveries_total: IntCounter,
    model_version_info: GaugeVec,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            batch_latency_seconds: register_histogram!(
                "prediction_service_batch_latency_seconds",
                "Time spent processing one invocation batch",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register batch_latency_seconds"),

            batch_size_records: register_histogram!(
                "prediction_service_batch_size_records",
                "Number of records per invocation batch",
                BATCH_SIZE_BUCKETS.to_vec()
            )
            .expect("Failed to register batch_size_records"),

            invocations_total: register_int_counter!(
                "prediction_service_invocations_total",
                "Total number of invocation requests"
            )
            .expect("Failed to register invocations_total"),

            invocation_errors_total: register_int_counter!(
                "prediction_service_invocation_errors_total",
                "Total number of failed invocation requests"
            )
            .expect("Failed to register invocation_errors_total"),

            prediction_events_total: register_int_counter!(
                "prediction_service_prediction_events_total",
                "Total number of prediction events produced"
            )
            .expect("Failed to register prediction_events_total"),

            deliveries_total: register_int_counter!(
                "prediction_service_deliveries_total",
                "Total number of prediction events forwarded to the stream"
            )
            .expect("Failed to register deliveries_total"),

            model_version_info: register_gauge_vec!(
                "prediction_service_model_version_info",
                "Information about the model version in use",
                &["version"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    /// Create a metrics handle, initializing the global instance if needed
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_batch_latency(&self, duration_secs: f64) {
        self.inner().batch_latency_seconds.observe(duration_secs);
    }

    pub fn observe_batch_size(&self, records: usize) {
        self.inner().batch_size_records.observe(records as f64);
    }

    pub fn inc_invocations(&self) {
        self.inner().invocations_total.inc();
    }

    pub fn inc_invocation_errors(&self) {
        self.inner().invocation_errors_total.inc();
    }

    pub fn add_prediction_events(&self, count: u64) {
        self.inner().prediction_events_total.inc_by(count);
    }

    pub fn inc_deliveries(&self) {
        self.inner().deliveries_total.inc();
    }

    /// Record the model version in use. "none" stands for the heuristic
    /// predictor with no trained model attached.
    pub fn set_model_version(&self, version: &str) {
        self.inner().model_version_info.reset();
        self.inner()
            .model_version_info
            .with_label_values(&[version])
            .set(1.0);
    }
}

/// Structured logger for service events
#[derive(Clone)]
pub struct StructuredLogger {
    stream_name: String,
}

impl StructuredLogger {
    pub fn new(stream_name: impl Into<String>) -> Self {
        Self {
            stream_name: stream_name.into(),
        }
    }

    /// Log one produced prediction event
    pub fn log_prediction(&self, ride_id: &serde_json::Value, ride_duration: f64, version: Option<&str>) {
        info!(
            event = "prediction_generated",
            stream = %self.stream_name,
            ride_id = %ride_id,
            ride_duration = ride_duration,
            model_version = version.unwrap_or("none"),
            "Generated ride duration prediction"
        );
    }

    /// Log one record handed to the stream forwarder
    pub fn log_delivery(&self, partition_key: &str, payload_bytes: usize) {
        info!(
            event = "prediction_delivered",
            stream = %self.stream_name,
            partition_key = %partition_key,
            payload_bytes = payload_bytes,
            "Forwarded prediction event"
        );
    }

    /// Log a failed invocation batch
    pub fn log_invocation_error(&self, records: usize, error: &str) {
        error!(
            event = "invocation_failed",
            stream = %self.stream_name,
            records = records,
            error = %error,
            "Invocation batch failed"
        );
    }

    pub fn log_startup(&self, service_version: &str, model_version: Option<&str>) {
        info!(
            event = "service_started",
            stream = %self.stream_name,
            service_version = %service_version,
            model_version = model_version.unwrap_or("none"),
            "Prediction service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            stream = %self.stream_name,
            reason = %reason,
            "Prediction service shutting down"
        );
    }

    /// Log the delivery forwarder stopping outside of shutdown
    pub fn log_delivery_stopped(&self) {
        warn!(
            event = "delivery_stopped",
            stream = %self.stream_name,
            "Delivery channel closed, no further predictions will be forwarded"
        );
    }
}
