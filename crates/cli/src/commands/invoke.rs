//! Invoke a running prediction service

use super::ride_event_from_args;
use crate::client::ApiClient;
use crate::output::{print_prediction_events, OutputFormat};
use crate::RideArgs;
use anyhow::{Context, Result};
use service_lib::codec::encode_ride_event;
use service_lib::models::{EventBatch, EventRecord, RecordPayload};

/// Build an event batch and send it to the service
///
/// `--file` takes a complete batch in the wire shape; otherwise a
/// single-record batch is built from the ride arguments.
pub async fn run(
    client: &ApiClient,
    file: Option<&str>,
    ride: &RideArgs,
    format: OutputFormat,
) -> Result<()> {
    let batch = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read event file {}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("{} is not a valid event batch", path))?
        }
        None => {
            let event = ride_event_from_args(ride)?;
            EventBatch {
                records: vec![EventRecord {
                    kinesis: RecordPayload {
                        data: encode_ride_event(&event)?,
                    },
                }],
            }
        }
    };

    let response = client.invoke(&batch).await?;
    print_prediction_events(&response.prediction_events, format)?;

    Ok(())
}
