//! Prediction adapter
//!
//! Turns a batch of encoded stream records into prediction events: decode
//! each record, derive its features, ask the predictor for a duration,
//! wrap the result in an envelope, and hand it to every registered
//! delivery callback.
//!
//! Processing is synchronous and strictly in input order. Nothing is
//! retried here: a decode, prediction, or delivery failure fails the whole
//! batch and the error propagates to the supervising runtime.

use crate::codec;
use crate::delivery::DeliveryCallback;
use crate::models::{
    EventBatch, FeatureSet, Prediction, PredictionEvent, PredictionResponse, Ride, MODEL_NAME,
};
use crate::predictor::Predictor;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Derive the feature set for a ride. Pure and deterministic.
pub fn prepare_features(ride: &Ride) -> FeatureSet {
    FeatureSet {
        pu_do: format!(
            "{}_{}",
            ride.pickup_location_id, ride.dropoff_location_id
        ),
        trip_distance: ride.trip_distance,
    }
}

/// Adapter connecting stream input to the prediction function and the
/// delivery callbacks
///
/// The predictor, model version, and callback list are fixed at
/// construction; the adapter itself holds no mutable state.
pub struct PredictionAdapter {
    predictor: Arc<dyn Predictor>,
    model_version: Option<String>,
    callbacks: Vec<Box<dyn DeliveryCallback>>,
}

impl PredictionAdapter {
    pub fn new(
        predictor: Arc<dyn Predictor>,
        model_version: Option<String>,
        callbacks: Vec<Box<dyn DeliveryCallback>>,
    ) -> Self {
        Self {
            predictor,
            model_version,
            callbacks,
        }
    }

    pub fn builder() -> PredictionAdapterBuilder {
        PredictionAdapterBuilder::new()
    }

    /// Version identifier stamped on every prediction event
    pub fn model_version(&self) -> Option<&str> {
        self.model_version.as_deref()
    }

    /// Number of registered delivery callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Run the prediction function and take the first element of its
    /// result sequence.
    pub fn predict(&self, features: &FeatureSet) -> Result<f64> {
        let predictions = self
            .predictor
            .predict(features)
            .context("prediction failed")?;
        predictions
            .first()
            .copied()
            .context("predictor returned an empty result")
    }

    /// Process one batch of encoded records, in input order.
    pub fn handle_batch(&self, batch: &EventBatch) -> Result<PredictionResponse> {
        let mut prediction_events = Vec::with_capacity(batch.records.len());

        for record in &batch.records {
            let ride_event = codec::decode_record(&record.kinesis.data)
                .context("failed to decode stream record")?;

            let features = prepare_features(&ride_event.ride);
            let ride_duration = self.predict(&features)?;

            let event = PredictionEvent {
                model: MODEL_NAME.to_string(),
                version: self.model_version.clone(),
                prediction: Prediction {
                    ride_duration,
                    ride_id: ride_event.ride_id,
                },
            };

            for callback in &self.callbacks {
                callback.deliver(&event)?;
            }

            prediction_events.push(event);
        }

        Ok(PredictionResponse { prediction_events })
    }
}

/// Builder for [`PredictionAdapter`]
pub struct PredictionAdapterBuilder {
    predictor: Option<Arc<dyn Predictor>>,
    model_version: Option<String>,
    callbacks: Vec<Box<dyn DeliveryCallback>>,
}

impl PredictionAdapterBuilder {
    pub fn new() -> Self {
        Self {
            predictor: None,
            model_version: None,
            callbacks: Vec::new(),
        }
    }

    pub fn predictor(mut self, predictor: Arc<dyn Predictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    /// Register a delivery callback. Callbacks run in registration order.
    pub fn callback(mut self, callback: Box<dyn DeliveryCallback>) -> Self {
        self.callbacks.push(callback);
        self
    }

    pub fn callbacks(mut self, callbacks: Vec<Box<dyn DeliveryCallback>>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn build(self) -> Result<PredictionAdapter> {
        let predictor = self
            .predictor
            .ok_or_else(|| anyhow::anyhow!("predictor is required"))?;
        Ok(PredictionAdapter::new(
            predictor,
            self.model_version,
            self.callbacks,
        ))
    }
}

impl Default for PredictionAdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_ride_event, ENCODED_RIDE_EVENT};
    use crate::models::{EventRecord, RecordPayload, RideEvent};
    use serde_json::json;
    use std::sync::Mutex;

    const FIXED_DURATION: f64 = 18.168945726405333;

    /// Predictor returning a fixed value for every feature set
    struct MockPredictor {
        value: f64,
    }

    impl Predictor for MockPredictor {
        fn predict(&self, _features: &FeatureSet) -> Result<Vec<f64>> {
            Ok(vec![self.value])
        }
    }

    /// Predictor whose result sequence is empty
    struct EmptyPredictor;

    impl Predictor for EmptyPredictor {
        fn predict(&self, _features: &FeatureSet) -> Result<Vec<f64>> {
            Ok(Vec::new())
        }
    }

    /// Callback recording delivered events under a shared label
    struct RecordingCallback {
        label: &'static str,
        log: Arc<Mutex<Vec<(&'static str, PredictionEvent)>>>,
    }

    impl DeliveryCallback for RecordingCallback {
        fn deliver(&self, event: &PredictionEvent) -> Result<()> {
            self.log.lock().unwrap().push((self.label, event.clone()));
            Ok(())
        }
    }

    struct FailingCallback;

    impl DeliveryCallback for FailingCallback {
        fn deliver(&self, _event: &PredictionEvent) -> Result<()> {
            anyhow::bail!("stream unavailable")
        }
    }

    fn adapter_with(
        version: Option<&str>,
        callbacks: Vec<Box<dyn DeliveryCallback>>,
    ) -> PredictionAdapter {
        let mut builder = PredictionAdapter::builder()
            .predictor(Arc::new(MockPredictor {
                value: FIXED_DURATION,
            }))
            .callbacks(callbacks);
        if let Some(version) = version {
            builder = builder.model_version(version);
        }
        builder.build().unwrap()
    }

    fn batch_of(payloads: Vec<String>) -> EventBatch {
        EventBatch {
            records: payloads
                .into_iter()
                .map(|data| EventRecord {
                    kinesis: RecordPayload { data },
                })
                .collect(),
        }
    }

    fn encoded_ride(ride_id: u64) -> String {
        encode_ride_event(&RideEvent {
            ride: Ride {
                pickup_location_id: 130,
                dropoff_location_id: 205,
                trip_distance: 3.66,
            },
            ride_id: json!(ride_id),
        })
        .unwrap()
    }

    #[test]
    fn test_prepare_features() {
        let ride = Ride {
            pickup_location_id: 130,
            dropoff_location_id: 205,
            trip_distance: 3.66,
        };

        let features = prepare_features(&ride);

        assert_eq!(features.pu_do, "130_205");
        assert!((features.trip_distance - 3.66).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prepare_features_is_deterministic() {
        let ride = Ride {
            pickup_location_id: 1,
            dropoff_location_id: 2,
            trip_distance: 9.9,
        };
        assert_eq!(prepare_features(&ride), prepare_features(&ride));
    }

    #[test]
    fn test_predict_returns_mocked_value() {
        let adapter = adapter_with(Some("123"), Vec::new());
        let features = FeatureSet {
            pu_do: "130_205".to_string(),
            trip_distance: 3.66,
        };

        let prediction = adapter.predict(&features).unwrap();
        assert_eq!(prediction, FIXED_DURATION);
    }

    #[test]
    fn test_predict_empty_result_is_an_error() {
        let adapter = PredictionAdapter::builder()
            .predictor(Arc::new(EmptyPredictor))
            .build()
            .unwrap();
        let features = FeatureSet {
            pu_do: "1_2".to_string(),
            trip_distance: 1.0,
        };

        assert!(adapter.predict(&features).is_err());
    }

    #[test]
    fn test_handle_batch_end_to_end() {
        let adapter = adapter_with(Some("123"), Vec::new());
        let batch = batch_of(vec![ENCODED_RIDE_EVENT.to_string()]);

        let response = adapter.handle_batch(&batch).unwrap();

        let expected = json!({
            "prediction_events": [{
                "model": "ride_duration_prediction_model",
                "version": "123",
                "prediction": {
                    "ride_duration": FIXED_DURATION,
                    "ride_id": 156,
                },
            }],
        });
        assert_eq!(serde_json::to_value(&response).unwrap(), expected);
    }

    #[test]
    fn test_handle_batch_preserves_input_order() {
        let adapter = adapter_with(None, Vec::new());
        let batch = batch_of((0..5).map(encoded_ride).collect());

        let response = adapter.handle_batch(&batch).unwrap();

        assert_eq!(response.prediction_events.len(), 5);
        for (i, event) in response.prediction_events.iter().enumerate() {
            assert_eq!(event.prediction.ride_id, json!(i as u64));
            assert_eq!(event.version, None);
        }
    }

    #[test]
    fn test_callbacks_invoked_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let callbacks: Vec<Box<dyn DeliveryCallback>> = vec![
            Box::new(RecordingCallback {
                label: "first",
                log: log.clone(),
            }),
            Box::new(RecordingCallback {
                label: "second",
                log: log.clone(),
            }),
        ];
        let adapter = adapter_with(Some("123"), callbacks);

        let batch = batch_of(vec![encoded_ride(1), encoded_ride(2)]);
        adapter.handle_batch(&batch).unwrap();

        let delivered = log.lock().unwrap();
        let labels: Vec<&str> = delivered.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["first", "second", "first", "second"]);
        assert_eq!(delivered[0].1.prediction.ride_id, json!(1));
        assert_eq!(delivered[2].1.prediction.ride_id, json!(2));
    }

    #[test]
    fn test_failing_callback_fails_the_batch() {
        let adapter = adapter_with(Some("123"), vec![Box::new(FailingCallback)]);
        let batch = batch_of(vec![ENCODED_RIDE_EVENT.to_string()]);

        assert!(adapter.handle_batch(&batch).is_err());
    }

    #[test]
    fn test_malformed_record_fails_the_batch() {
        let adapter = adapter_with(Some("123"), Vec::new());
        let batch = batch_of(vec![encoded_ride(1), "%%% not base64 %%%".to_string()]);

        assert!(adapter.handle_batch(&batch).is_err());
    }

    #[test]
    fn test_empty_batch_yields_empty_response() {
        let adapter = adapter_with(Some("123"), Vec::new());
        let batch = batch_of(Vec::new());

        let response = adapter.handle_batch(&batch).unwrap();
        assert!(response.prediction_events.is_empty());
    }

    #[test]
    fn test_builder_requires_predictor() {
        assert!(PredictionAdapter::builder().build().is_err());
    }

    #[test]
    fn test_builder_counts_callbacks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let adapter = PredictionAdapter::builder()
            .predictor(Arc::new(MockPredictor { value: 1.0 }))
            .callback(Box::new(RecordingCallback { label: "only", log }))
            .build()
            .unwrap();

        assert_eq!(adapter.callback_count(), 1);
        assert_eq!(adapter.model_version(), None);
    }
}
