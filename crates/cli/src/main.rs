//! Ride Duration Predictor CLI
//!
//! A command-line tool for encoding ride events into the wire format,
//! invoking a running prediction service, and checking its health.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{encode, health, invoke};

/// Ride Duration Predictor CLI
#[derive(Parser)]
#[command(name = "rdp")]
#[command(author, version, about = "CLI for the Ride Duration Predictor", long_about = None)]
pub struct Cli {
    /// Service URL (can also be set via RDP_API_URL env var)
    #[arg(long, env = "RDP_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Base64-encode a ride event into its wire representation
    Encode(RideArgs),

    /// Send an event batch to the service and print the predictions
    Invoke {
        /// Path to a full event batch JSON file (the `Records` wire shape)
        #[arg(long)]
        file: Option<String>,

        #[command(flatten)]
        ride: RideArgs,
    },

    /// Check service health
    Health,
}

/// Ride fields for building a single event
#[derive(Args, Default)]
pub struct RideArgs {
    /// Path to a ride event JSON file ({"ride": {...}, "ride_id": ...})
    #[arg(long = "ride-file")]
    pub ride_file: Option<String>,

    /// Pickup location zone id
    #[arg(long)]
    pub pu_location_id: Option<i64>,

    /// Drop-off location zone id
    #[arg(long)]
    pub do_location_id: Option<i64>,

    /// Trip distance in miles
    #[arg(long)]
    pub trip_distance: Option<f64>,

    /// Ride id, carried through to the prediction event
    #[arg(long)]
    pub ride_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(ride) => {
            encode::run(&ride)?;
        }
        Commands::Invoke { file, ride } => {
            let client = client::ApiClient::new(&cli.api_url)?;
            invoke::run(&client, file.as_deref(), &ride, cli.format).await?;
        }
        Commands::Health => {
            let client = client::ApiClient::new(&cli.api_url)?;
            health::run(&client, cli.format).await?;
        }
    }

    Ok(())
}
