//! Analytics engine for synthetic health-check results
//!
//! This crate provides the core functionality for:
//! - Availability, latency and SLA aggregates over check windows
//! - Incident detection from consecutive-failure runs
//! - Failure severity, heatmap and chart series
//! - Cross-resource failure correlation
//! - Batch ingestion and report assembly
//! - Health checks and observability

pub mod analytics;
pub mod error;
pub mod health;
pub mod ingest;
pub mod models;
pub mod observability;
pub mod report;
pub mod store;

pub use error::{IngestError, ReportError, StoreError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use ingest::BatchIngestor;
pub use models::*;
pub use observability::{EngineMetrics, StructuredLogger};
pub use report::ReportBuilder;
pub use store::{CheckStore, MemoryStore};
