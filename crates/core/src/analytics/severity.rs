//! Failure severity classification
//!
//! Buckets failing checks by response time. The thresholds overlap:
//! `resolved` matches everything above one second, so a failing check at
//! two seconds counts as both `warning` and `resolved`. Dashboards were
//! built against these exact buckets; do not make them exclusive without
//! a product decision.

use crate::models::{Check, FailureSeverity};

/// Response time above which a failure is critical
const CRITICAL_SECS: f64 = 3.0;
/// Lower bound of the warning band (inclusive, upper bound CRITICAL_SECS)
const WARNING_SECS: f64 = 1.0;

/// Classify the failing checks of a window into severity buckets.
/// Succeeding checks are ignored. Each failing check is tested against
/// every bucket independently.
pub fn classify_failures(checks: &[Check]) -> FailureSeverity {
    let mut severity = FailureSeverity::default();
    for check in checks.iter().filter(|c| !c.success) {
        let r = check.response_time;
        if r > CRITICAL_SECS {
            severity.critical += 1;
        }
        if (WARNING_SECS..=CRITICAL_SECS).contains(&r) {
            severity.warning += 1;
        }
        if r > WARNING_SECS {
            severity.resolved += 1;
        }
    }
    severity
}
