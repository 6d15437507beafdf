//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use service_lib::models::PredictionEvent;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Row for the prediction events table
#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Ride ID")]
    ride_id: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Version")]
    version: String,
}

/// Print prediction events in the requested format
pub fn print_prediction_events(events: &[PredictionEvent], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(events)?);
        }
        OutputFormat::Table => {
            if events.is_empty() {
                print_warning("No prediction events returned");
                return Ok(());
            }

            let rows: Vec<PredictionRow> = events
                .iter()
                .map(|e| PredictionRow {
                    ride_id: e.prediction.ride_id.to_string(),
                    duration: format_duration(e.prediction.ride_duration),
                    model: e.model.clone(),
                    version: e.version.clone().unwrap_or_else(|| "-".to_string()),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
            println!("\nTotal: {} predictions", events.len());
        }
    }

    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Format a duration in minutes for display
pub fn format_duration(minutes: f64) -> String {
    format!("{:.2} min", minutes)
}

/// Color a health status string
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "healthy" => status.green().to_string(),
        "degraded" => status.yellow().to_string(),
        "unhealthy" => status.red().to_string(),
        _ => status.to_string(),
    }
}
