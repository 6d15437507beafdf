//! Prediction function boundary

mod heuristic;

pub use heuristic::{HeuristicPredictor, BASE_DURATION_MINUTES, MINUTES_PER_MILE};

use crate::models::FeatureSet;
use anyhow::Result;

/// Trait for injected prediction functions
///
/// Implementations return one duration estimate per input row; the adapter
/// consumes the first. Trained-model predictors are supplied by the
/// model-serving side and plugged in at adapter construction.
pub trait Predictor: Send + Sync {
    /// Estimate ride durations (minutes) for the given feature set
    fn predict(&self, features: &FeatureSet) -> Result<Vec<f64>>;
}
