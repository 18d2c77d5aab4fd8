//! HTTP API: report queries, check ingestion, probes and metrics

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uptrack_core::{
    health::{ComponentStatus, HealthRegistry},
    BatchIngestor, CheckStore, DependencyEdge, EngineMetrics, FailureSeverity, HeatmapCell,
    IngestError, MemoryStore, MetricsBlock, ReportBuilder, ReportError, ResourceReport,
    StatsBlock, StructuredLogger, TimestampValue,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub reports: Arc<ReportBuilder>,
    pub ingestor: Arc<BatchIngestor>,
    pub health_registry: HealthRegistry,
    pub metrics: EngineMetrics,
    pub logger: StructuredLogger,
}

/// Wire form of the scalar metrics block. Absent aggregates are
/// substituted with 0 here, at the presentation boundary, and each
/// substitution is logged; the core never invents zeros.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
    pub uptime: f64,
    pub avg_response_time: f64,
    pub incidents: u64,
    pub mttr: f64,
    pub sla_compliance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub failures_count: Vec<TimestampValue>,
    pub response_time: Vec<TimestampValue>,
    pub failures_by_types: FailureSeverity,
    pub heatmap: Vec<HeatmapCell>,
    pub dependencies: Vec<DependencyEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub metrics: MetricsDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsDto>,
}

fn substitute(value: Option<f64>, metric: &str, url: Option<&str>, logger: &StructuredLogger) -> f64 {
    value.unwrap_or_else(|| {
        logger.log_metric_substituted(metric, url);
        0.0
    })
}

fn render_report(report: ResourceReport, logger: &StructuredLogger) -> ReportDto {
    let url = report.url;
    let MetricsBlock {
        uptime,
        avg_response_time,
        incidents,
        mttr,
        sla_compliance,
    } = report.metrics;

    let metrics = MetricsDto {
        uptime: substitute(uptime, "uptime", url.as_deref(), logger),
        avg_response_time: substitute(avg_response_time, "avgResponseTime", url.as_deref(), logger),
        incidents,
        mttr: substitute(mttr, "mttr", url.as_deref(), logger),
        sla_compliance: substitute(sla_compliance, "slaCompliance", url.as_deref(), logger),
    };

    let stats = report.stats.map(
        |StatsBlock {
             failures_count,
             response_time,
             failures_by_types,
             heatmap,
             dependencies,
         }| StatsDto {
            failures_count,
            response_time,
            failures_by_types,
            heatmap,
            dependencies,
        },
    );

    ReportDto { url, metrics, stats }
}

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub url: String,
    #[serde(rename = "intervalHour")]
    pub interval_hour: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub accepted: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_body(message: impl Into<String>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: message.into(),
    })
}

/// Resource report for a url prefix and trailing interval
async fn report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> impl IntoResponse {
    match state
        .reports
        .resource_report(&params.url, params.interval_hour)
        .await
    {
        Ok(report) => {
            state
                .logger
                .log_report_served(report.url.as_deref(), Some(params.interval_hour));
            (StatusCode::OK, Json(render_report(report, &state.logger))).into_response()
        }
        Err(ReportError::InvalidInterval(interval)) => (
            StatusCode::BAD_REQUEST,
            error_body(format!(
                "intervalHour must be a positive number of hours, got {interval}"
            )),
        )
            .into_response(),
        Err(ReportError::Store(err)) => {
            error!(url = %params.url, error = %err, "Report query failed");
            (StatusCode::SERVICE_UNAVAILABLE, error_body(err.to_string())).into_response()
        }
    }
}

/// Fleet-wide report over all resources
async fn report_common(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.reports.fleet_report().await {
        Ok(report) => {
            state.logger.log_report_served(None, None);
            (StatusCode::OK, Json(render_report(report, &state.logger))).into_response()
        }
        Err(err) => {
            error!(error = %err, "Fleet report query failed");
            (StatusCode::SERVICE_UNAVAILABLE, error_body(err.to_string())).into_response()
        }
    }
}

/// Ingest a batch of check records; the whole batch is rejected on any
/// parse or invariant failure
async fn ingest_checks(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    match state.ingestor.ingest(&body).await {
        Ok(accepted) => {
            let stored = state.store.len().await.unwrap_or(0);
            state
                .metrics
                .set_store_size(stored as i64, state.store.resource_count() as i64);
            (StatusCode::OK, Json(IngestResponse { accepted })).into_response()
        }
        Err(err @ (IngestError::MalformedBatch(_) | IngestError::InvalidRecord { .. })) => {
            state.logger.log_batch_rejected(&err.to_string());
            (StatusCode::BAD_REQUEST, error_body(err.to_string())).into_response()
        }
        Err(IngestError::Store(err)) => {
            error!(error = %err, "Store rejected check batch");
            (StatusCode::SERVICE_UNAVAILABLE, error_body(err.to_string())).into_response()
        }
    }
}

/// Health check response - 200 while at least degraded, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %err, "Failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(report))
        .route("/report-common", get(report_common))
        .route("/checks", post(ingest_checks))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
