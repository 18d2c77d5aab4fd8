//! Cross-resource failure correlation
//!
//! Builds a dependency graph between resources sharing a prefix: two
//! resources whose failures cluster in the same minutes are likely
//! coupled. Each resource's window is partitioned into 1-minute buckets;
//! a bucket where the resource has at least one check gets a binary
//! failure indicator. For every pair the Pearson coefficient is computed
//! over the buckets both resources populated. Pairs where either
//! indicator series has zero variance are excluded, since their
//! correlation is undefined.
//!
//! When no pair qualifies the result is an empty list; a placeholder
//! edge is never fabricated.

use crate::models::{Check, DependencyEdge};
use std::collections::BTreeMap;

const MINUTE_SECS: i64 = 60;

/// Compute the correlation edge list for a window of checks.
///
/// Emits both directed edges per qualifying pair, with the same rounded
/// correlation, sorted descending by correlation and then by `(from,
/// to)` for a deterministic order among ties.
pub fn failure_correlation(checks: &[Check]) -> Vec<DependencyEdge> {
    // resource -> minute bucket -> "had a failure in this bucket"
    let mut grids: BTreeMap<&str, BTreeMap<i64, bool>> = BTreeMap::new();
    for check in checks {
        let bucket = check.timestamp.timestamp().div_euclid(MINUTE_SECS);
        let slot = grids
            .entry(check.url.as_str())
            .or_default()
            .entry(bucket)
            .or_insert(false);
        *slot |= !check.success;
    }

    let resources: Vec<&str> = grids.keys().copied().collect();
    let mut edges = Vec::new();

    for (i, &a) in resources.iter().enumerate() {
        for &b in &resources[i + 1..] {
            let Some(correlation) = pairwise(&grids[a], &grids[b]) else {
                continue;
            };
            let rounded = (correlation * 100.0).round() / 100.0;
            edges.push(DependencyEdge {
                from: a.to_string(),
                to: b.to_string(),
                correlation: rounded,
            });
            edges.push(DependencyEdge {
                from: b.to_string(),
                to: a.to_string(),
                correlation: rounded,
            });
        }
    }

    edges.sort_by(|x, y| {
        y.correlation
            .partial_cmp(&x.correlation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.from.cmp(&y.from))
            .then_with(|| x.to.cmp(&y.to))
    });
    edges
}

/// Pearson coefficient of two indicator grids over their shared buckets.
/// `None` when there are no shared buckets or either series has zero
/// variance over them.
fn pairwise(a: &BTreeMap<i64, bool>, b: &BTreeMap<i64, bool>) -> Option<f64> {
    let mut n = 0.0f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx, mut sum_yy) = (0.0, 0.0, 0.0, 0.0, 0.0);

    for (bucket, &fail_a) in a {
        let Some(&fail_b) = b.get(bucket) else {
            continue;
        };
        let x = f64::from(u8::from(fail_a));
        let y = f64::from(u8::from(fail_b));
        n += 1.0;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
        sum_yy += y * y;
    }

    if n == 0.0 {
        return None;
    }

    let mean_x = sum_x / n;
    let mean_y = sum_y / n;
    let var_x = sum_xx / n - mean_x * mean_x;
    let var_y = sum_yy / n - mean_y * mean_y;
    if var_x < f64::EPSILON || var_y < f64::EPSILON {
        return None;
    }

    let cov = sum_xy / n - mean_x * mean_y;
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn base() -> DateTime<Utc> {
        "2026-03-02T12:00:00Z".parse().unwrap()
    }

    fn check(url: &str, minute: i64, success: bool) -> Check {
        Check {
            url: url.to_string(),
            timestamp: base() + Duration::minutes(minute),
            success,
            response_time: 0.5,
            status_code: None,
            error: None,
        }
    }

    /// Checks for two resources failing in exactly the same minutes
    fn lockstep_failures() -> Vec<Check> {
        let mut checks = Vec::new();
        for minute in 0..10 {
            let failing = minute % 3 == 0;
            checks.push(check("https://a.example", minute, !failing));
            checks.push(check("https://b.example", minute, !failing));
        }
        checks
    }

    #[test]
    fn test_perfectly_coupled_resources_correlate_at_one() {
        let edges = failure_correlation(&lockstep_failures());
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].correlation, 1.0);
        assert_eq!(edges[1].correlation, 1.0);
    }

    #[test]
    fn test_both_directions_carry_the_same_value() {
        let edges = failure_correlation(&lockstep_failures());
        let ab = edges
            .iter()
            .find(|e| e.from == "https://a.example" && e.to == "https://b.example")
            .unwrap();
        let ba = edges
            .iter()
            .find(|e| e.from == "https://b.example" && e.to == "https://a.example")
            .unwrap();
        assert_eq!(ab.correlation, ba.correlation);
    }

    #[test]
    fn test_zero_variance_pair_is_excluded() {
        // b never fails: its indicator series is constant, so the
        // correlation is undefined and the pair must not appear.
        let mut checks = Vec::new();
        for minute in 0..10 {
            checks.push(check("https://a.example", minute, minute % 2 == 0));
            checks.push(check("https://b.example", minute, true));
        }
        assert!(failure_correlation(&checks).is_empty());
    }

    #[test]
    fn test_opposed_failures_correlate_negatively() {
        let mut checks = Vec::new();
        for minute in 0..10 {
            let a_fails = minute % 2 == 0;
            checks.push(check("https://a.example", minute, !a_fails));
            checks.push(check("https://b.example", minute, a_fails));
        }
        let edges = failure_correlation(&checks);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].correlation, -1.0);
    }

    #[test]
    fn test_only_shared_buckets_are_compared() {
        // a has checks in minutes 0..10, b only in 5..10. The pair is
        // compared over minutes 5..10 where both alternate identically.
        let mut checks = Vec::new();
        for minute in 0..10 {
            checks.push(check("https://a.example", minute, minute % 2 == 0));
        }
        for minute in 5..10 {
            checks.push(check("https://b.example", minute, minute % 2 == 0));
        }
        let edges = failure_correlation(&checks);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].correlation, 1.0);
    }

    #[test]
    fn test_disjoint_grids_produce_no_edge() {
        let mut checks = Vec::new();
        for minute in 0..5 {
            checks.push(check("https://a.example", minute, minute % 2 == 0));
        }
        for minute in 10..15 {
            checks.push(check("https://b.example", minute, minute % 2 == 0));
        }
        assert!(failure_correlation(&checks).is_empty());
    }

    #[test]
    fn test_single_resource_yields_no_edges() {
        let checks: Vec<Check> = (0..10)
            .map(|m| check("https://a.example", m, m % 2 == 0))
            .collect();
        assert!(failure_correlation(&checks).is_empty());
    }

    #[test]
    fn test_edges_sorted_descending_with_name_tiebreak() {
        // Three resources: a and b perfectly coupled, c loosely coupled
        // to both.
        let mut checks = Vec::new();
        for minute in 0..12 {
            let failing = minute % 3 == 0;
            checks.push(check("https://a.example", minute, !failing));
            checks.push(check("https://b.example", minute, !failing));
            // c fails in a partially overlapping pattern
            checks.push(check("https://c.example", minute, minute % 4 != 0));
        }
        let edges = failure_correlation(&checks);
        assert_eq!(edges.len(), 6);
        for pair in edges.windows(2) {
            assert!(pair[0].correlation >= pair[1].correlation);
        }
        // The top pair is the perfectly coupled one, a->b before b->a.
        assert_eq!(edges[0].from, "https://a.example");
        assert_eq!(edges[0].to, "https://b.example");
        assert_eq!(edges[0].correlation, 1.0);
    }

    #[test]
    fn test_multiple_checks_in_one_minute_collapse_to_one_indicator() {
        // Any failure within the minute marks the bucket failed, even if
        // a success follows in the same minute.
        let mut checks = Vec::new();
        for minute in 0..6 {
            let failing = minute % 2 == 0;
            checks.push(check("https://a.example", minute, !failing));
            checks.push(check("https://b.example", minute, !failing));
            if failing {
                // extra success in the same failed minute
                checks.push(check("https://b.example", minute, true));
            }
        }
        let edges = failure_correlation(&checks);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].correlation, 1.0);
    }
}
