//! Report assembly
//!
//! The composition point of the engine: fetch a snapshot of checks from
//! the store, run the analytics over it, compose the blocks. Reports are
//! recomputed from scratch on every request; nothing is cached, so
//! concurrent requests never contend.

use crate::analytics::{
    avg_incident_duration, avg_response_time, classify_failures, detect_incidents,
    failure_correlation, failure_heatmap, failures_per_hour, response_time_per_hour,
    sla_compliance, uptime_percent,
};
use crate::error::{ReportError, StoreError};
use crate::models::{Check, MetricsBlock, ResourceReport, StatsBlock};
use crate::observability::EngineMetrics;
use crate::store::CheckStore;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default bound on one store fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds per-resource and fleet reports from an injected check store
pub struct ReportBuilder {
    store: Arc<dyn CheckStore>,
    fetch_timeout: Duration,
    metrics: EngineMetrics,
}

impl ReportBuilder {
    pub fn new(store: Arc<dyn CheckStore>, metrics: EngineMetrics) -> Self {
        Self {
            store,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            metrics,
        }
    }

    /// Override the store fetch timeout
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Report for one resource prefix over a trailing window of
    /// `interval_hours`. A trailing slash on `url` is normalized away
    /// before prefix matching.
    pub async fn resource_report(
        &self,
        url: &str,
        interval_hours: i64,
    ) -> Result<ResourceReport, ReportError> {
        if interval_hours <= 0 {
            self.metrics.inc_report_errors();
            return Err(ReportError::InvalidInterval(interval_hours));
        }
        // Oversized intervals saturate rather than truncate; u32::MAX
        // hours already covers every stored check.
        let interval = u32::try_from(interval_hours).unwrap_or(u32::MAX);
        let prefix = url.trim_end_matches('/');

        let started = Instant::now();
        let checks = self
            .fetch(self.store.fetch_checks(prefix, interval))
            .await
            .inspect_err(|_| self.metrics.inc_report_errors())?;

        let incidents = detect_incidents(&checks);
        let metrics = MetricsBlock {
            uptime: uptime_percent(&checks),
            avg_response_time: avg_response_time(&checks),
            incidents: incidents.len() as u64,
            mttr: avg_incident_duration(&incidents),
            sla_compliance: sla_compliance(&checks, Utc::now()),
        };

        let dependencies = failure_correlation(&checks);
        if dependencies.is_empty() {
            debug!(url = prefix, "No resource pair qualified for correlation");
        }
        let stats = StatsBlock {
            failures_count: failures_per_hour(&checks),
            response_time: response_time_per_hour(&checks),
            failures_by_types: classify_failures(&checks),
            heatmap: failure_heatmap(&checks),
            dependencies,
        };

        self.metrics.observe_report(started.elapsed().as_secs_f64());
        Ok(ResourceReport {
            url: Some(prefix.to_string()),
            metrics,
            stats: Some(stats),
        })
    }

    /// Fleet-wide report: scalar aggregates over every stored check, no
    /// stats block.
    pub async fn fleet_report(&self) -> Result<ResourceReport, ReportError> {
        let started = Instant::now();
        let checks = self
            .fetch(self.store.fetch_all())
            .await
            .inspect_err(|_| self.metrics.inc_report_errors())?;

        let incidents = detect_incidents(&checks);
        let metrics = MetricsBlock {
            uptime: uptime_percent(&checks),
            avg_response_time: avg_response_time(&checks),
            incidents: incidents.len() as u64,
            mttr: avg_incident_duration(&incidents),
            sla_compliance: sla_compliance(&checks, Utc::now()),
        };

        self.metrics.observe_report(started.elapsed().as_secs_f64());
        Ok(ResourceReport {
            url: None,
            metrics,
            stats: None,
        })
    }

    /// Bound a store query by the configured timeout. Retrying is left
    /// to the caller.
    async fn fetch<F>(&self, query: F) -> Result<Vec<Check>, StoreError>
    where
        F: Future<Output = Result<Vec<Check>, StoreError>>,
    {
        tokio::time::timeout(self.fetch_timeout, query)
            .await
            .map_err(|_| StoreError::Timeout(self.fetch_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{async_trait, MemoryStore};
    use chrono::Duration as ChronoDuration;

    fn check(url: &str, age_minutes: i64, success: bool, response_time: f64) -> Check {
        Check {
            url: url.to_string(),
            timestamp: Utc::now() - ChronoDuration::minutes(age_minutes),
            success,
            response_time,
            status_code: None,
            error: None,
        }
    }

    async fn builder_with(checks: Vec<Check>) -> ReportBuilder {
        let store = Arc::new(MemoryStore::new());
        store.append_batch(checks).await.unwrap();
        ReportBuilder::new(store, EngineMetrics::new())
    }

    #[tokio::test]
    async fn test_resource_report_composes_all_blocks() {
        let builder = builder_with(vec![
            check("https://a.example", 30, true, 0.2),
            check("https://a.example", 25, true, 0.2),
            check("https://a.example", 20, false, 4.0),
            check("https://a.example", 15, false, 4.0),
            check("https://a.example", 10, true, 0.2),
        ])
        .await;

        let report = builder
            .resource_report("https://a.example", 1)
            .await
            .unwrap();

        assert_eq!(report.url.as_deref(), Some("https://a.example"));
        assert_eq!(report.metrics.uptime, Some(60.0));
        assert_eq!(report.metrics.incidents, 1);
        assert_eq!(report.metrics.mttr, Some(300.0));
        assert_eq!(report.metrics.sla_compliance, Some(60.0));

        let stats = report.stats.unwrap();
        assert_eq!(stats.heatmap.len(), 168);
        assert_eq!(stats.failures_by_types.critical, 2);
        assert!(!stats.failures_count.is_empty());
    }

    #[tokio::test]
    async fn test_trailing_slash_is_normalized() {
        let builder = builder_with(vec![check("https://a.example/api", 5, true, 0.2)]).await;
        let report = builder
            .resource_report("https://a.example/", 1)
            .await
            .unwrap();
        assert_eq!(report.url.as_deref(), Some("https://a.example"));
        assert_eq!(report.metrics.uptime, Some(100.0));
    }

    #[tokio::test]
    async fn test_non_positive_interval_is_rejected() {
        let builder = builder_with(vec![]).await;
        assert!(matches!(
            builder.resource_report("https://a.example", 0).await,
            Err(ReportError::InvalidInterval(0))
        ));
        assert!(matches!(
            builder.resource_report("https://a.example", -3).await,
            Err(ReportError::InvalidInterval(-3))
        ));
    }

    #[tokio::test]
    async fn test_oversized_interval_saturates_instead_of_wrapping() {
        // 2^32 + 1 hours wraps to 1 under a plain u32 cast, which would
        // silently shrink the window to the newest checks.
        let builder = builder_with(vec![check("https://a.example", 48 * 60, false, 2.0)]).await;

        let report = builder
            .resource_report("https://a.example", (1_i64 << 32) + 1)
            .await
            .unwrap();

        assert_eq!(report.metrics.uptime, Some(0.0));
    }

    #[tokio::test]
    async fn test_empty_window_reports_absent_aggregates() {
        let builder = builder_with(vec![]).await;
        let report = builder
            .resource_report("https://nothing.example", 1)
            .await
            .unwrap();

        assert_eq!(report.metrics.uptime, None);
        assert_eq!(report.metrics.avg_response_time, None);
        assert_eq!(report.metrics.incidents, 0);
        assert_eq!(report.metrics.mttr, None);
        assert_eq!(report.metrics.sla_compliance, None);

        // The heatmap grid is still complete, just zero-valued.
        let stats = report.stats.unwrap();
        assert_eq!(stats.heatmap.len(), 168);
        assert!(stats.heatmap.iter().all(|c| c.value == 0));
        assert!(stats.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_fleet_report_has_no_url_and_no_stats() {
        let builder = builder_with(vec![
            check("https://a.example", 5, true, 0.2),
            check("https://b.example", 5, false, 2.0),
        ])
        .await;

        let report = builder.fleet_report().await.unwrap();
        assert!(report.url.is_none());
        assert!(report.stats.is_none());
        assert_eq!(report.metrics.uptime, Some(50.0));
        assert_eq!(report.metrics.incidents, 1);
    }

    struct StalledStore;

    #[async_trait]
    impl CheckStore for StalledStore {
        async fn fetch_checks(&self, _: &str, _: u32) -> Result<Vec<Check>, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        async fn fetch_all(&self) -> Result<Vec<Check>, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        async fn append_batch(&self, _: Vec<Check>) -> Result<(), StoreError> {
            Ok(())
        }

        async fn len(&self) -> Result<usize, StoreError> {
            Ok(0)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_store_surfaces_as_timeout() {
        let builder = ReportBuilder::new(Arc::new(StalledStore), EngineMetrics::new())
            .with_fetch_timeout(Duration::from_millis(50));

        let result = builder.resource_report("https://a.example", 1).await;
        assert!(matches!(
            result,
            Err(ReportError::Store(StoreError::Timeout(_)))
        ));
    }
}
