//! Encode a ride event into the wire format

use super::ride_event_from_args;
use crate::RideArgs;
use anyhow::Result;
use service_lib::codec::encode_ride_event;

/// Print the base64 wire representation of a ride event
pub fn run(args: &RideArgs) -> Result<()> {
    let event = ride_event_from_args(args)?;
    println!("{}", encode_ride_event(&event)?);
    Ok(())
}
