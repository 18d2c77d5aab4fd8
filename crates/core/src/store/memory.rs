//! In-memory check store
//!
//! Keeps one append-only vector of checks per resource in a concurrent
//! map. Good enough for a single-process deployment and for tests; a
//! durable store can replace it behind the same trait.

use super::{async_trait, CheckStore};
use crate::error::StoreError;
use crate::models::Check;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Concurrent, append-only in-memory store keyed by resource url
#[derive(Debug, Default)]
pub struct MemoryStore {
    checks: DashMap<String, Vec<Check>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            checks: DashMap::new(),
        }
    }

    /// Number of distinct resources seen so far
    pub fn resource_count(&self) -> usize {
        self.checks.len()
    }
}

#[async_trait]
impl CheckStore for MemoryStore {
    async fn fetch_checks(&self, prefix: &str, since_hours: u32) -> Result<Vec<Check>, StoreError> {
        // Windows wider than the representable date range clamp to
        // "everything stored".
        let cutoff = Utc::now()
            .checked_sub_signed(Duration::hours(i64::from(since_hours)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut out = Vec::new();
        for entry in self.checks.iter() {
            if !entry.key().starts_with(prefix) {
                continue;
            }
            out.extend(
                entry
                    .value()
                    .iter()
                    .filter(|c| c.timestamp >= cutoff)
                    .cloned(),
            );
        }
        Ok(out)
    }

    async fn fetch_all(&self) -> Result<Vec<Check>, StoreError> {
        let mut out = Vec::new();
        for entry in self.checks.iter() {
            out.extend(entry.value().iter().cloned());
        }
        Ok(out)
    }

    async fn append_batch(&self, checks: Vec<Check>) -> Result<(), StoreError> {
        for check in checks {
            self.checks
                .entry(check.url.clone())
                .or_default()
                .push(check);
        }
        Ok(())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.checks.iter().map(|e| e.value().len()).sum())
    }
}
