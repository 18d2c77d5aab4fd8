//! Incident detection
//!
//! An incident is a maximal run of consecutive failing checks for one
//! resource, bounded by a success or by the edges of the query window.
//! Detection is a sequential scan per resource over timestamp-sorted
//! records, carrying the previous record as a cursor.
//!
//! Two deliberately asymmetric aggregates come out of the runs: the
//! incident count includes single-check runs (a lone failure still
//! signals instability), while the mean duration is taken only over runs
//! of two or more checks (a single check has no extent and would drag
//! the average toward zero).

use crate::models::{Check, Incident};
use std::collections::BTreeMap;

/// Detect all incidents in a window of checks, across every resource
/// present in the slice. Resources are processed in lexicographic order
/// and runs within a resource in timestamp order, so the output is
/// deterministic for a given input set.
pub fn detect_incidents(checks: &[Check]) -> Vec<Incident> {
    let mut by_resource: BTreeMap<&str, Vec<&Check>> = BTreeMap::new();
    for check in checks {
        by_resource.entry(check.url.as_str()).or_default().push(check);
    }

    let mut incidents = Vec::new();
    for (resource, mut timeline) in by_resource {
        timeline.sort_by_key(|c| c.timestamp);

        let mut open: Option<Incident> = None;
        for check in timeline {
            if check.success {
                if let Some(incident) = open.take() {
                    incidents.push(incident);
                }
            } else {
                match open.as_mut() {
                    Some(incident) => {
                        incident.end_time = check.timestamp;
                        incident.failure_count += 1;
                    }
                    None => {
                        open = Some(Incident {
                            resource: resource.to_string(),
                            start_time: check.timestamp,
                            end_time: check.timestamp,
                            failure_count: 1,
                        });
                    }
                }
            }
        }
        // Run still open at the end of the window
        if let Some(incident) = open {
            incidents.push(incident);
        }
    }
    incidents
}

/// Mean duration in seconds over incidents with at least two failing
/// checks. `None` when no incident qualifies.
pub fn avg_incident_duration(incidents: &[Incident]) -> Option<f64> {
    let durations: Vec<f64> = incidents
        .iter()
        .filter(|i| i.failure_count >= 2)
        .map(Incident::duration_secs)
        .collect();
    if durations.is_empty() {
        return None;
    }
    Some(durations.iter().sum::<f64>() / durations.len() as f64)
}
