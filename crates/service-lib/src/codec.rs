//! Wire codec for stream records
//!
//! Record payloads arrive base64-encoded; the decoded payload is a UTF-8
//! JSON document describing a single ride event.

use crate::models::RideEvent;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Errors raised while decoding a record payload
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("payload is not a valid ride event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a base64-encoded UTF-8 JSON payload into a [`RideEvent`].
///
/// Leading and trailing whitespace is tolerated (payloads read from fixture
/// files commonly carry a trailing newline).
pub fn decode_record(encoded: &str) -> Result<RideEvent, DecodeError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// Encode a ride event into its wire representation.
///
/// Inverse of [`decode_record`]; used by the CLI and by tests.
pub fn encode_ride_event(event: &RideEvent) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(event)?;
    Ok(STANDARD.encode(json))
}

/// Captured payload from the production event stream, decoding to
/// `{"ride": {"PULocationID": 130, "DOLocationID": 205, "trip_distance": 3.66}, "ride_id": 156}`
#[cfg(test)]
pub(crate) const ENCODED_RIDE_EVENT: &str = "ewogICAgICAgICJyaWRlIjogewogICAgICAgICAgICAiUFVMb2NhdGlvbklEIjogMTMwLAogICAgICAgICAgICAiRE9Mb2NhdGlvbklEIjogMjA1LAogICAgICAgICAgICAidHJpcF9kaXN0YW5jZSI6IDMuNjYKICAgICAgICB9LCAKICAgICAgICAicmlkZV9pZCI6IDE1NgogICAgfQ==";
