//! Resource report command

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use crate::client::{ApiClient, Report};
use crate::output::{color_correlation, color_percent, format_secs, print_info, OutputFormat};

/// Row for the scalar metrics table
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Row for the dependency table
#[derive(Tabled)]
struct DependencyRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Correlation")]
    correlation: String,
}

/// Fetch and render the report for one resource
pub async fn show_report(
    client: &ApiClient,
    url: &str,
    interval_hours: u32,
    format: OutputFormat,
) -> Result<()> {
    let report = client.report(url, interval_hours).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => render_tables(&report, interval_hours),
    }

    Ok(())
}

fn render_tables(report: &Report, interval_hours: u32) {
    if let Some(url) = &report.url {
        print_info(&format!("Report for {} (last {}h)", url, interval_hours));
    }

    let metrics = &report.metrics;
    let rows = vec![
        MetricRow {
            name: "Uptime".to_string(),
            value: color_percent(metrics.uptime),
        },
        MetricRow {
            name: "Avg response time".to_string(),
            value: format_secs(metrics.avg_response_time),
        },
        MetricRow {
            name: "Incidents".to_string(),
            value: metrics.incidents.to_string(),
        },
        MetricRow {
            name: "MTTR".to_string(),
            value: format_secs(metrics.mttr),
        },
        MetricRow {
            name: "SLA (30d)".to_string(),
            value: color_percent(metrics.sla_compliance),
        },
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));

    let Some(stats) = &report.stats else {
        return;
    };

    let severity = &stats.failures_by_types;
    print_info(&format!(
        "Failures by type: critical {}, warning {}, resolved {}",
        severity.critical, severity.warning, severity.resolved
    ));

    if stats.dependencies.is_empty() {
        print_info("No correlated resources in this window");
        return;
    }

    // The edge list is symmetric; showing the top ten directed edges is
    // plenty for a terminal.
    let rows: Vec<DependencyRow> = stats
        .dependencies
        .iter()
        .take(10)
        .map(|d| DependencyRow {
            from: d.from.clone(),
            to: d.to.clone(),
            correlation: color_correlation(d.correlation),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}
