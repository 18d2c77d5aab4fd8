//! Batch ingestion of check records
//!
//! Batches arrive as JSON arrays of check records from whatever transport
//! the deployment uses (queue consumer, HTTP push). The handler here is
//! transport-free: hand it the raw payload, it either appends the whole
//! batch to the store or rejects the whole batch. There is no partial
//! insert.

use crate::error::IngestError;
use crate::models::Check;
use crate::observability::EngineMetrics;
use crate::store::CheckStore;
use std::sync::Arc;
use tracing::debug;

/// Parse a JSON payload into a batch of checks.
///
/// Unknown fields are ignored (forward-compatible schema); any record
/// that fails to parse or carries a negative response time rejects the
/// batch as a whole.
pub fn parse_batch(payload: &[u8]) -> Result<Vec<Check>, IngestError> {
    let checks: Vec<Check> = serde_json::from_slice(payload)?;
    for check in &checks {
        if check.response_time < 0.0 {
            return Err(IngestError::InvalidRecord {
                url: check.url.clone(),
                reason: format!("negative response time {}", check.response_time),
            });
        }
    }
    Ok(checks)
}

/// Appends parsed batches to the check store
pub struct BatchIngestor {
    store: Arc<dyn CheckStore>,
    metrics: EngineMetrics,
}

impl BatchIngestor {
    pub fn new(store: Arc<dyn CheckStore>, metrics: EngineMetrics) -> Self {
        Self { store, metrics }
    }

    /// Ingest one payload. Returns the number of checks appended, or an
    /// error with nothing inserted.
    pub async fn ingest(&self, payload: &[u8]) -> Result<usize, IngestError> {
        let checks = match parse_batch(payload) {
            Ok(checks) => checks,
            Err(err) => {
                self.metrics.inc_rejected_batches();
                return Err(err);
            }
        };

        let count = checks.len();
        self.store.append_batch(checks).await?;
        self.metrics.observe_ingested_batch(count);
        debug!(checks = count, "Ingested check batch");
        Ok(count)
    }
}
