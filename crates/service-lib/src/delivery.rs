//! Delivery callbacks for prediction events
//!
//! The adapter fans each prediction event out to a list of callbacks held
//! from construction. The channel-backed callback is the boundary to the
//! stream transport: events are serialized, keyed by ride id, and handed to
//! whatever forwarder owns the receiving end of the channel.

use crate::models::PredictionEvent;
use anyhow::{Context, Result};
use serde_json::Value;
use tokio::sync::mpsc;

/// Trait for injected delivery callbacks, invoked in registration order
///
/// Callbacks are fire-and-forget from the adapter's perspective: the
/// adapter does not catch delivery errors, it propagates them to the
/// caller and the batch fails.
pub trait DeliveryCallback: Send + Sync {
    fn deliver(&self, event: &PredictionEvent) -> Result<()>;
}

/// Outbound record handed to the stream forwarder
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRecord {
    /// Stream partition key: the stringified ride id
    pub partition_key: String,
    /// Serialized prediction event
    pub data: String,
}

/// Callback forwarding serialized prediction events into a bounded channel
///
/// `try_send` keeps the adapter free of suspension points; a full or
/// closed channel surfaces as a delivery error.
pub struct ChannelCallback {
    sender: mpsc::Sender<OutboundRecord>,
}

impl ChannelCallback {
    pub fn new(sender: mpsc::Sender<OutboundRecord>) -> Self {
        Self { sender }
    }
}

impl DeliveryCallback for ChannelCallback {
    fn deliver(&self, event: &PredictionEvent) -> Result<()> {
        let record = OutboundRecord {
            partition_key: partition_key(event),
            data: serde_json::to_string(event)
                .context("failed to serialize prediction event")?,
        };
        self.sender
            .try_send(record)
            .context("delivery channel full or closed")?;
        Ok(())
    }
}

/// Partition key for a prediction event: the ride id as a bare string
///
/// String ids are used verbatim (no surrounding quotes); any other JSON
/// value takes its compact textual form.
pub fn partition_key(event: &PredictionEvent) -> String {
    match &event.prediction.ride_id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
