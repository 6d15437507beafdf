//! CLI commands

pub mod encode;
pub mod health;
pub mod invoke;

use crate::RideArgs;
use anyhow::{Context, Result};
use serde_json::Value;
use service_lib::models::{Ride, RideEvent};

/// Build a ride event from CLI arguments: either a JSON file or the full
/// set of inline ride flags.
pub fn ride_event_from_args(args: &RideArgs) -> Result<RideEvent> {
    if let Some(path) = &args.ride_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ride file {}", path))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("{} is not a valid ride event", path));
    }

    match (
        args.pu_location_id,
        args.do_location_id,
        args.trip_distance,
        &args.ride_id,
    ) {
        (Some(pu), Some(dropoff), Some(distance), Some(ride_id)) => Ok(RideEvent {
            ride: Ride {
                pickup_location_id: pu,
                dropoff_location_id: dropoff,
                trip_distance: distance,
            },
            ride_id: parse_ride_id(ride_id),
        }),
        _ => anyhow::bail!(
            "Provide --ride-file, or all of --pu-location-id, --do-location-id, \
             --trip-distance, and --ride-id"
        ),
    }
}

/// Parse a ride id argument, keeping JSON types when they apply
///
/// `156` becomes a number, anything that does not parse as JSON is used as
/// a plain string.
fn parse_ride_id(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ride_id_number() {
        assert_eq!(parse_ride_id("156"), json!(156));
    }

    #[test]
    fn test_parse_ride_id_string() {
        assert_eq!(parse_ride_id("trip-42"), json!("trip-42"));
    }

    #[test]
    fn test_ride_event_from_inline_flags() {
        let args = RideArgs {
            ride_file: None,
            pu_location_id: Some(130),
            do_location_id: Some(205),
            trip_distance: Some(3.66),
            ride_id: Some("156".to_string()),
        };

        let event = ride_event_from_args(&args).unwrap();
        assert_eq!(event.ride.pickup_location_id, 130);
        assert_eq!(event.ride.dropoff_location_id, 205);
        assert_eq!(event.ride_id, json!(156));
    }

    #[test]
    fn test_ride_event_requires_all_flags() {
        let args = RideArgs {
            pu_location_id: Some(130),
            ..Default::default()
        };

        assert!(ride_event_from_args(&args).is_err());
    }
}
