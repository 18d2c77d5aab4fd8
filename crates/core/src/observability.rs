//! Observability infrastructure for the analytics engine
//!
//! Provides:
//! - Prometheus metrics (ingest throughput, report latency, store size)
//! - Structured JSON event logging with tracing

use prometheus::{register_histogram, register_int_counter, register_int_gauge, Histogram, IntCounter, IntGauge};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for report assembly latency (in seconds)
const REPORT_LATENCY_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EngineMetricsInner> = OnceLock::new();

struct EngineMetricsInner {
    ingest_batches: IntCounter,
    ingest_checks: IntCounter,
    ingest_rejected_batches: IntCounter,
    checks_stored: IntGauge,
    resources_tracked: IntGauge,
    reports_served: IntCounter,
    report_errors: IntCounter,
    report_latency_seconds: Histogram,
}

impl EngineMetricsInner {
    fn new() -> Self {
        Self {
            ingest_batches: register_int_counter!(
                "uptrack_ingest_batches_total",
                "Number of check batches accepted"
            )
            .expect("Failed to register ingest_batches_total"),

            ingest_checks: register_int_counter!(
                "uptrack_ingest_checks_total",
                "Number of individual checks accepted"
            )
            .expect("Failed to register ingest_checks_total"),

            ingest_rejected_batches: register_int_counter!(
                "uptrack_ingest_rejected_batches_total",
                "Number of check batches rejected in full"
            )
            .expect("Failed to register ingest_rejected_batches_total"),

            checks_stored: register_int_gauge!(
                "uptrack_checks_stored",
                "Checks currently held by the store"
            )
            .expect("Failed to register checks_stored"),

            resources_tracked: register_int_gauge!(
                "uptrack_resources_tracked",
                "Distinct resources with at least one stored check"
            )
            .expect("Failed to register resources_tracked"),

            reports_served: register_int_counter!(
                "uptrack_reports_served_total",
                "Reports successfully assembled"
            )
            .expect("Failed to register reports_served_total"),

            report_errors: register_int_counter!(
                "uptrack_report_errors_total",
                "Report requests that failed"
            )
            .expect("Failed to register report_errors_total"),

            report_latency_seconds: register_histogram!(
                "uptrack_report_latency_seconds",
                "Time spent assembling a report",
                REPORT_LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register report_latency_seconds"),
        }
    }
}

/// Engine metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct EngineMetrics {
    _private: (),
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EngineMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EngineMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record an accepted batch of the given size
    pub fn observe_ingested_batch(&self, checks: usize) {
        self.inner().ingest_batches.inc();
        self.inner().ingest_checks.inc_by(checks as u64);
    }

    /// Record a rejected batch
    pub fn inc_rejected_batches(&self) {
        self.inner().ingest_rejected_batches.inc();
    }

    /// Update store size gauges
    pub fn set_store_size(&self, checks: i64, resources: i64) {
        self.inner().checks_stored.set(checks);
        self.inner().resources_tracked.set(resources);
    }

    /// Record a served report and its assembly latency
    pub fn observe_report(&self, duration_secs: f64) {
        self.inner().reports_served.inc();
        self.inner().report_latency_seconds.observe(duration_secs);
    }

    /// Increment the report error counter
    pub fn inc_report_errors(&self) {
        self.inner().report_errors.inc();
    }
}

/// Structured logger for engine events
///
/// Consistent JSON-formatted logging for served reports, rejected
/// batches, and lifecycle events.
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log a served report
    pub fn log_report_served(&self, url: Option<&str>, interval_hours: Option<i64>) {
        info!(
            event = "report_served",
            instance = %self.instance,
            url = url.unwrap_or("<fleet>"),
            interval_hours = interval_hours,
            "Report assembled"
        );
    }

    /// Log a rejected ingestion batch
    pub fn log_batch_rejected(&self, reason: &str) {
        warn!(
            event = "batch_rejected",
            instance = %self.instance,
            reason = %reason,
            "Check batch rejected in full"
        );
    }

    /// Log that an absent aggregate was substituted with a default at
    /// the serving boundary
    pub fn log_metric_substituted(&self, metric: &str, url: Option<&str>) {
        warn!(
            event = "metric_substituted",
            instance = %self.instance,
            metric = %metric,
            url = url.unwrap_or("<fleet>"),
            "No data for aggregate, substituting 0"
        );
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str) {
        info!(
            event = "startup",
            instance = %self.instance,
            version = %version,
            "uptrack started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "shutdown",
            instance = %self.instance,
            reason = %reason,
            "uptrack shutting down"
        );
    }
}
