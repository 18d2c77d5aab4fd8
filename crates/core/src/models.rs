//! Core data models for the analytics engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable observation of a resource's reachability and latency.
///
/// Checks arrive in batches from the probing side; unknown fields in the
/// wire representation are ignored so the schema can grow without breaking
/// older producers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    /// Monitored resource identifier, typically a URL
    pub url: String,
    /// UTC instant the probe ran
    pub timestamp: DateTime<Utc>,
    /// Whether the probe succeeded
    pub success: bool,
    /// Response time in seconds, non-negative
    pub response_time: f64,
    /// HTTP status code, when the probe got that far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Probe error description for failed checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A maximal run of consecutive failing checks for one resource.
///
/// Derived on every query from the check window, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub resource: String,
    /// Timestamp of the first failing check in the run
    pub start_time: DateTime<Utc>,
    /// Timestamp of the last failing check in the run
    pub end_time: DateTime<Utc>,
    /// Number of failing checks in the run, always >= 1
    pub failure_count: usize,
}

impl Incident {
    /// Duration of the run in seconds (zero for single-check runs)
    pub fn duration_secs(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

/// One point of an hourly chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampValue {
    pub timestamp: String,
    pub value: f64,
}

/// Failure counts bucketed by response-time severity.
///
/// The buckets deliberately overlap: every failing check with a response
/// time above one second counts as `resolved` in addition to whichever of
/// `warning`/`critical` applies. This mirrors the behavior the dashboards
/// were built against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSeverity {
    pub critical: u64,
    pub warning: u64,
    pub resolved: u64,
}

/// One cell of the day-of-week x hour-of-day failure heatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Weekday name, "Monday" through "Sunday"
    pub day: String,
    /// Hour of day, 0-23
    pub hour: u32,
    /// Failing checks observed in that slot
    pub value: u64,
}

/// Directed, correlation-weighted relation between two resources'
/// failure patterns. The relation is symmetric; both directions are
/// emitted with the same correlation for consumer convenience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub correlation: f64,
}

/// Scalar aggregates of a report.
///
/// Absent aggregates stay `None` here; substituting a presentable default
/// is the job of the serving boundary, not the computation layer.
#[derive(Debug, Clone, Default)]
pub struct MetricsBlock {
    /// Percentage of successful checks, 0-100
    pub uptime: Option<f64>,
    /// Mean response time in seconds over all checks
    pub avg_response_time: Option<f64>,
    /// Number of incidents in the window, single-failure runs included
    pub incidents: u64,
    /// Mean incident duration in seconds, multi-check runs only
    pub mttr: Option<f64>,
    /// Uptime restricted to the trailing 30 days
    pub sla_compliance: Option<f64>,
}

/// Chart series and distributions of a resource report
#[derive(Debug, Clone)]
pub struct StatsBlock {
    pub failures_count: Vec<TimestampValue>,
    pub response_time: Vec<TimestampValue>,
    pub failures_by_types: FailureSeverity,
    pub heatmap: Vec<HeatmapCell>,
    pub dependencies: Vec<DependencyEdge>,
}

/// A composed report for one resource prefix, or for the whole fleet
/// (no url, no stats). Created per request and discarded after the
/// response; nothing here is cached or mutated.
#[derive(Debug, Clone)]
pub struct ResourceReport {
    pub url: Option<String>,
    pub metrics: MetricsBlock,
    pub stats: Option<StatsBlock>,
}
