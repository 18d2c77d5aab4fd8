//! Check batch ingestion command

use anyhow::{Context, Result};
use std::path::Path;

use crate::client::ApiClient;
use crate::output::{print_success, OutputFormat};

/// Read a JSON batch file and push it to the server
pub async fn push_batch(client: &ApiClient, file: &Path, format: OutputFormat) -> Result<()> {
    let payload = std::fs::read(file)
        .with_context(|| format!("Failed to read batch file {}", file.display()))?;

    let response = client.ingest(payload).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Table => {
            print_success(&format!("Accepted {} checks", response.accepted));
        }
    }

    Ok(())
}
