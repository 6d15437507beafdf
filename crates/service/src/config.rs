//! Service configuration
//!
//! All environment access lives here; the adapter and library types take
//! their parameters explicitly.

use anyhow::Result;
use serde::Deserialize;

/// Service configuration, read from `PREDICTOR_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// HTTP port for the invoke/health/metrics endpoints
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Name of the stream that prediction events are forwarded to
    #[serde(default = "default_stream_name")]
    pub predictions_stream_name: String,

    /// Run id of the trained model; stamped on every prediction event as
    /// its version (null when absent)
    #[serde(default)]
    pub run_id: Option<String>,

    /// Explicit model artifact location; overrides the composed path
    #[serde(default)]
    pub model_location: Option<String>,

    /// Bucket holding model artifacts
    #[serde(default = "default_model_bucket")]
    pub model_bucket: String,

    /// Experiment the run id belongs to
    #[serde(default = "default_experiment_id")]
    pub experiment_id: String,

    /// Disables the stream delivery callback (integration test mode)
    #[serde(default)]
    pub test_run: bool,

    /// Capacity of the bounded delivery channel
    #[serde(default = "default_delivery_queue_capacity")]
    pub delivery_queue_capacity: usize,
}

fn default_http_port() -> u16 {
    8080
}

fn default_stream_name() -> String {
    "ride_predictions".to_string()
}

fn default_model_bucket() -> String {
    "mlflow-models".to_string()
}

fn default_experiment_id() -> String {
    "1".to_string()
}

fn default_delivery_queue_capacity() -> usize {
    1024
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            predictions_stream_name: default_stream_name(),
            run_id: None,
            model_location: None,
            model_bucket: default_model_bucket(),
            experiment_id: default_experiment_id(),
            test_run: false,
            delivery_queue_capacity: default_delivery_queue_capacity(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("PREDICTOR").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    /// Where the trained model artifact lives
    ///
    /// An explicit location always wins; otherwise one is composed from
    /// bucket, experiment, and run id. `None` means no trained model is
    /// configured and the service falls back to the heuristic predictor.
    /// Artifact retrieval itself is owned by the model-serving side.
    pub fn model_location(&self) -> Option<String> {
        if let Some(location) = &self.model_location {
            return Some(location.clone());
        }
        self.run_id.as_ref().map(|run_id| {
            format!(
                "s3://{}/{}/{}/artifacts/model",
                self.model_bucket, self.experiment_id, run_id
            )
        })
    }
}
