//! CLI command implementations

pub mod fleet;
pub mod ingest;
pub mod report;
