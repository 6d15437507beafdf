//! Check service health

use crate::client::ApiClient;
use crate::output::{color_status, print_error, print_success, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use service_lib::health::ComponentStatus;

/// Query the health endpoint and report component status
pub async fn run(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health = client.health().await;

    let health = match health {
        Ok(health) => health,
        Err(e) => {
            print_error(&format!("Service unreachable: {e:#}"));
            std::process::exit(1);
        }
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        OutputFormat::Table => {
            println!("{}", "Service Health".bold());
            println!("{}", "=".repeat(40));

            let status_text = serde_json::to_value(health.status)?
                .as_str()
                .unwrap_or("unknown")
                .to_string();
            println!("Overall: {}", color_status(&status_text));
            println!();

            let mut names: Vec<&String> = health.components.keys().collect();
            names.sort();
            for name in names {
                let component = &health.components[name];
                let component_status = serde_json::to_value(component.status)?
                    .as_str()
                    .unwrap_or("unknown")
                    .to_string();
                match &component.message {
                    Some(message) => println!(
                        "{:<12} {} ({})",
                        name,
                        color_status(&component_status),
                        message
                    ),
                    None => println!("{:<12} {}", name, color_status(&component_status)),
                }
            }

            if health.status == ComponentStatus::Healthy {
                println!();
                print_success("All components healthy");
            }
        }
    }

    Ok(())
}
