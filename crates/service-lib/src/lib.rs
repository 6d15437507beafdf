//! Core library for the ride duration prediction service
//!
//! This crate provides:
//! - Wire codec for base64-encoded stream records
//! - Feature extraction and the prediction adapter
//! - The predictor and delivery-callback boundaries
//! - Health checks and observability

pub mod adapter;
pub mod codec;
pub mod delivery;
pub mod health;
pub mod models;
pub mod observability;
pub mod predictor;

pub use adapter::{prepare_features, PredictionAdapter, PredictionAdapterBuilder};
pub use delivery::{ChannelCallback, DeliveryCallback, OutboundRecord};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
pub use predictor::{HeuristicPredictor, Predictor};
