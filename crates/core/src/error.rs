//! Error taxonomy for the analytics engine.
//!
//! Absence of data is not an error: aggregates over empty sets come back
//! as `None` from the analytics functions. The types here cover the cases
//! that genuinely fail: a broken collaborator, a malformed ingestion
//! batch, and invalid report parameters.

use std::time::Duration;
use thiserror::Error;

/// Failure of the check store collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying query failed
    #[error("check store query failed: {0}")]
    Query(String),

    /// The query did not complete within the caller-supplied timeout
    #[error("check store query timed out after {0:?}")]
    Timeout(Duration),
}

/// Rejection of an ingestion batch. The whole batch is dropped; there is
/// no partial insert.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The payload could not be parsed as an array of check records
    #[error("malformed check batch: {0}")]
    MalformedBatch(#[from] serde_json::Error),

    /// A record violated a field invariant
    #[error("invalid check record for {url}: {reason}")]
    InvalidRecord { url: String, reason: String },

    /// The store rejected the append
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure to build a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// The lookback interval must be a positive number of hours
    #[error("interval must be a positive number of hours, got {0}")]
    InvalidInterval(i64),

    /// The check store failed or timed out; retrying is the caller's call
    #[error(transparent)]
    Store(#[from] StoreError),
}
