//! Fleet report command

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use crate::client::ApiClient;
use crate::output::{color_percent, format_secs, print_info, OutputFormat};

/// Row for the fleet metrics table
#[derive(Tabled)]
struct FleetRow {
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Avg response")]
    avg_response: String,
    #[tabled(rename = "Incidents")]
    incidents: String,
    #[tabled(rename = "MTTR")]
    mttr: String,
    #[tabled(rename = "SLA (30d)")]
    sla: String,
}

/// Fetch and render fleet-wide metrics
pub async fn show_fleet(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let report = client.fleet_report().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_info("Fleet-wide metrics");
            let metrics = &report.metrics;
            let row = FleetRow {
                uptime: color_percent(metrics.uptime),
                avg_response: format_secs(metrics.avg_response_time),
                incidents: metrics.incidents.to_string(),
                mttr: format_secs(metrics.mttr),
                sla: color_percent(metrics.sla_compliance),
            };
            println!("{}", Table::new(vec![row]).with(Style::rounded()));
        }
    }

    Ok(())
}
