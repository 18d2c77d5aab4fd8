//! Hourly chart series
//!
//! Both series bucket checks into 1-hour UTC buckets and emit only
//! buckets that contain data, in ascending timestamp order. This is
//! group-by semantics, unlike the heatmap's zero-filled grid.

use crate::models::{Check, TimestampValue};
use chrono::DateTime;
use std::collections::BTreeMap;

const HOUR_SECS: i64 = 3600;

/// Count of failing checks per hour bucket
pub fn failures_per_hour(checks: &[Check]) -> Vec<TimestampValue> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for check in checks.iter().filter(|c| !c.success) {
        *buckets.entry(hour_bucket(check)).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(bucket, count)| TimestampValue {
            timestamp: format_bucket(bucket),
            value: count as f64,
        })
        .collect()
}

/// Mean response time per hour bucket over all checks, rounded to 3
/// decimals
pub fn response_time_per_hour(checks: &[Check]) -> Vec<TimestampValue> {
    let mut buckets: BTreeMap<i64, (f64, u64)> = BTreeMap::new();
    for check in checks {
        let entry = buckets.entry(hour_bucket(check)).or_default();
        entry.0 += check.response_time;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(bucket, (sum, count))| TimestampValue {
            timestamp: format_bucket(bucket),
            value: round3(sum / count as f64),
        })
        .collect()
}

fn hour_bucket(check: &Check) -> i64 {
    check.timestamp.timestamp().div_euclid(HOUR_SECS) * HOUR_SECS
}

fn format_bucket(bucket: i64) -> String {
    DateTime::from_timestamp(bucket, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn check(timestamp: &str, success: bool, response_time: f64) -> Check {
        Check {
            url: "https://svc.example".to_string(),
            timestamp: timestamp.parse::<DateTime<Utc>>().unwrap(),
            success,
            response_time,
            status_code: None,
            error: None,
        }
    }

    #[test]
    fn test_failures_grouped_by_hour_ascending() {
        let checks = vec![
            check("2026-03-02T15:10:00Z", false, 1.0),
            check("2026-03-02T14:05:00Z", false, 1.0),
            check("2026-03-02T14:55:00Z", false, 1.0),
            check("2026-03-02T14:30:00Z", true, 0.1),
        ];
        let series = failures_per_hour(&checks);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].timestamp, "2026-03-02 14:00:00");
        assert_eq!(series[0].value, 2.0);
        assert_eq!(series[1].timestamp, "2026-03-02 15:00:00");
        assert_eq!(series[1].value, 1.0);
    }

    #[test]
    fn test_failures_series_omits_empty_buckets() {
        let checks = vec![
            check("2026-03-02T10:00:00Z", false, 1.0),
            check("2026-03-02T13:00:00Z", false, 1.0),
        ];
        // Hours 11 and 12 simply do not appear.
        assert_eq!(failures_per_hour(&checks).len(), 2);
    }

    #[test]
    fn test_response_time_averages_all_checks() {
        let checks = vec![
            check("2026-03-02T14:05:00Z", true, 0.2),
            check("2026-03-02T14:35:00Z", false, 0.4),
        ];
        let series = response_time_per_hour(&checks);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 0.3);
    }

    #[test]
    fn test_response_time_rounds_to_three_decimals() {
        let checks = vec![
            check("2026-03-02T14:05:00Z", true, 0.1),
            check("2026-03-02T14:10:00Z", true, 0.2),
            check("2026-03-02T14:15:00Z", true, 0.2),
        ];
        let series = response_time_per_hour(&checks);
        assert_eq!(series[0].value, 0.167);
    }

    #[test]
    fn test_empty_input_empty_series() {
        assert!(failures_per_hour(&[]).is_empty());
        assert!(response_time_per_hour(&[]).is_empty());
    }
}
