//! Scalar availability and latency aggregates
//!
//! All three aggregates distinguish "no data" from a true zero: an empty
//! input set yields `None`, never `0.0`. The serving boundary decides
//! what to show in that case.

use crate::models::Check;
use chrono::{DateTime, Duration, Utc};

/// Trailing window the SLA figure is computed over
const SLA_WINDOW_DAYS: i64 = 30;

/// Percentage of successful checks, rounded to 2 decimals.
/// `None` when the set is empty.
pub fn uptime_percent(checks: &[Check]) -> Option<f64> {
    if checks.is_empty() {
        return None;
    }
    let successes = checks.iter().filter(|c| c.success).count();
    Some(round2(successes as f64 * 100.0 / checks.len() as f64))
}

/// Mean response time in seconds over all checks, failures included.
/// `None` when the set is empty.
pub fn avg_response_time(checks: &[Check]) -> Option<f64> {
    if checks.is_empty() {
        return None;
    }
    let sum: f64 = checks.iter().map(|c| c.response_time).sum();
    Some(sum / checks.len() as f64)
}

/// Uptime restricted to the trailing 30 days from `now`, rounded to 2
/// decimals. `None` when no check falls inside that window.
pub fn sla_compliance(checks: &[Check], now: DateTime<Utc>) -> Option<f64> {
    let cutoff = now - Duration::days(SLA_WINDOW_DAYS);
    let recent: Vec<Check> = checks
        .iter()
        .filter(|c| c.timestamp >= cutoff)
        .cloned()
        .collect();
    uptime_percent(&recent)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
