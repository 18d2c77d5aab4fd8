//! uptrack CLI
//!
//! A command-line tool for querying availability reports and pushing
//! check batches to an uptrack server.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{fleet, ingest, report};
use std::path::PathBuf;

/// uptrack CLI
#[derive(Parser)]
#[command(name = "uptrack")]
#[command(author, version, about = "CLI for the uptrack analytics service", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via UPTRACK_API_URL env var)
    #[arg(long, env = "UPTRACK_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Availability report for one resource
    Report {
        /// Resource URL prefix to report on
        url: String,

        /// Lookback window in hours
        #[arg(long, short, default_value_t = 24)]
        interval: u32,
    },

    /// Fleet-wide metrics over all resources
    Fleet,

    /// Push a JSON batch of check results to the server
    Ingest {
        /// Path to a JSON file containing an array of checks
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = client::ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Report { url, interval } => {
            report::show_report(&client, &url, interval, cli.format).await?;
        }
        Commands::Fleet => {
            fleet::show_fleet(&client, cli.format).await?;
        }
        Commands::Ingest { file } => {
            ingest::push_batch(&client, &file, cli.format).await?;
        }
    }

    Ok(())
}
