//! Core data models for the prediction service

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model name embedded in every prediction event
pub const MODEL_NAME: &str = "ride_duration_prediction_model";

/// Decoded trip record submitted for prediction
///
/// The ride id is opaque to this service: it is carried through to the
/// prediction event with its input type preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideEvent {
    pub ride: Ride,
    pub ride_id: Value,
}

/// Trip fields used for feature extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    #[serde(rename = "PULocationID")]
    pub pickup_location_id: i64,
    #[serde(rename = "DOLocationID")]
    pub dropoff_location_id: i64,
    pub trip_distance: f64,
}

/// Minimal derived input to the prediction function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    #[serde(rename = "PU_DO")]
    pub pu_do: String,
    pub trip_distance: f64,
}

/// Output envelope containing the predicted duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEvent {
    pub model: String,
    /// Run id of the model that produced the prediction; null when unknown
    pub version: Option<String>,
    pub prediction: Prediction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub ride_duration: f64,
    pub ride_id: Value,
}

/// Wire-format batch of encoded stream records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBatch {
    #[serde(rename = "Records")]
    pub records: Vec<EventRecord>,
}

/// Single stream record
///
/// Only the payload is consumed; sibling metadata fields (partition key,
/// sequence number, source ARNs) are ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub kinesis: RecordPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPayload {
    /// Base64-encoded UTF-8 JSON ride event
    pub data: String,
}

/// Response object returned for a processed batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction_events: Vec<PredictionEvent>,
}
