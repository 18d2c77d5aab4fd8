//! Check store abstraction
//!
//! The durable store of check records is a collaborator behind the
//! [`CheckStore`] trait. The contract is deliberately small: append a
//! batch, fetch a prefix-and-window slice, fetch everything. Ordering of
//! the returned records is not guaranteed; consumers that need timestamp
//! order (the incident detector) sort for themselves.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::models::Check;

pub use async_trait::async_trait;

/// Read/append access to stored check records
#[async_trait]
pub trait CheckStore: Send + Sync {
    /// All checks whose url starts with `prefix` and whose timestamp is
    /// within the trailing `since_hours` window. Ordering by (resource,
    /// timestamp) is not part of the contract.
    async fn fetch_checks(&self, prefix: &str, since_hours: u32) -> Result<Vec<Check>, StoreError>;

    /// Every stored check, for fleet-wide aggregates
    async fn fetch_all(&self) -> Result<Vec<Check>, StoreError>;

    /// Append a batch of checks. Append-only; existing records are never
    /// rewritten.
    async fn append_batch(&self, checks: Vec<Check>) -> Result<(), StoreError>;

    /// Total number of stored checks
    async fn len(&self) -> Result<usize, StoreError>;
}
