//! Analytics over immutable check snapshots
//!
//! Every function in this module tree is a pure computation over a slice
//! of check records fetched for one request. Nothing here holds state or
//! touches the store, so concurrent report requests can run these freely
//! in parallel.

pub mod correlation;
pub mod heatmap;
pub mod incidents;
pub mod metrics;
pub mod series;
pub mod severity;

pub use correlation::failure_correlation;
pub use heatmap::failure_heatmap;
pub use incidents::{avg_incident_duration, detect_incidents};
pub use metrics::{avg_response_time, sla_compliance, uptime_percent};
pub use series::{failures_per_hour, response_time_per_hour};
pub use severity::classify_failures;
