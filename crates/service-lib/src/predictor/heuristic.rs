//! Distance-based heuristic predictor
//!
//! Linear estimate over trip distance, used when no trained model is wired
//! into the service.

use super::Predictor;
use crate::models::FeatureSet;
use anyhow::Result;

/// Flat duration floor in minutes (pickup, traffic lights, drop-off)
pub const BASE_DURATION_MINUTES: f64 = 5.0;

/// Marginal minutes per mile of trip distance
pub const MINUTES_PER_MILE: f64 = 3.5;

/// Heuristic predictor estimating duration from trip distance alone
///
/// Ignores the `PU_DO` feature; the zone pair only matters to trained
/// models.
pub struct HeuristicPredictor {
    base_minutes: f64,
    minutes_per_mile: f64,
}

impl HeuristicPredictor {
    pub fn new() -> Self {
        Self {
            base_minutes: BASE_DURATION_MINUTES,
            minutes_per_mile: MINUTES_PER_MILE,
        }
    }

    pub fn with_params(base_minutes: f64, minutes_per_mile: f64) -> Self {
        Self {
            base_minutes,
            minutes_per_mile,
        }
    }
}

impl Default for HeuristicPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for HeuristicPredictor {
    fn predict(&self, features: &FeatureSet) -> Result<Vec<f64>> {
        // Negative distances appear in dirty trip data; treat them as zero.
        let distance = features.trip_distance.max(0.0);
        Ok(vec![self.base_minutes + distance * self.minutes_per_mile])
    }
}
