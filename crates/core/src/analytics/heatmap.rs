//! Day-of-week x hour-of-day failure heatmap
//!
//! The grid is fixed: 7 weekdays (Monday first) times 24 hours, 168 cells
//! in weekday-then-hour order. Cells with no failures are emitted with a
//! zero value rather than omitted, so consumers can index the grid
//! positionally.

use crate::models::{Check, HeatmapCell};
use chrono::{Datelike, Timelike};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const HOURS_PER_DAY: usize = 24;
const CELLS: usize = 7 * HOURS_PER_DAY;

/// Aggregate failing checks into the fixed 168-cell heatmap, by the UTC
/// weekday and hour of each failure.
pub fn failure_heatmap(checks: &[Check]) -> Vec<HeatmapCell> {
    let mut counts = [0u64; CELLS];
    for check in checks.iter().filter(|c| !c.success) {
        let day = check.timestamp.weekday().num_days_from_monday() as usize;
        let hour = check.timestamp.hour() as usize;
        counts[day * HOURS_PER_DAY + hour] += 1;
    }

    let mut cells = Vec::with_capacity(CELLS);
    for (day_index, day) in WEEKDAYS.iter().enumerate() {
        for hour in 0..HOURS_PER_DAY {
            cells.push(HeatmapCell {
                day: (*day).to_string(),
                hour: hour as u32,
                value: counts[day_index * HOURS_PER_DAY + hour],
            });
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn check(timestamp: &str, success: bool) -> Check {
        Check {
            url: "https://svc.example".to_string(),
            timestamp: timestamp.parse::<DateTime<Utc>>().unwrap(),
            success,
            response_time: 0.5,
            status_code: None,
            error: None,
        }
    }

    #[test]
    fn test_always_168_cells_even_when_empty() {
        let cells = failure_heatmap(&[]);
        assert_eq!(cells.len(), 168);
        assert!(cells.iter().all(|c| c.value == 0));
    }

    #[test]
    fn test_every_day_hour_pair_appears_once() {
        let cells = failure_heatmap(&[]);
        let mut seen = std::collections::HashSet::new();
        for cell in &cells {
            assert!(seen.insert((cell.day.clone(), cell.hour)));
        }
        assert_eq!(seen.len(), 168);
    }

    #[test]
    fn test_ordering_is_monday_first_then_hour() {
        let cells = failure_heatmap(&[]);
        assert_eq!(cells[0].day, "Monday");
        assert_eq!(cells[0].hour, 0);
        assert_eq!(cells[23].day, "Monday");
        assert_eq!(cells[23].hour, 23);
        assert_eq!(cells[24].day, "Tuesday");
        assert_eq!(cells[167].day, "Sunday");
        assert_eq!(cells[167].hour, 23);
    }

    #[test]
    fn test_failures_land_in_the_right_cell() {
        // 2026-03-02 is a Monday.
        let checks = vec![
            check("2026-03-02T14:05:00Z", false),
            check("2026-03-02T14:45:00Z", false),
            check("2026-03-08T23:59:00Z", false), // Sunday
            check("2026-03-02T14:30:00Z", true),  // success, not counted
        ];
        let cells = failure_heatmap(&checks);

        let monday_14 = cells
            .iter()
            .find(|c| c.day == "Monday" && c.hour == 14)
            .unwrap();
        assert_eq!(monday_14.value, 2);

        let sunday_23 = cells
            .iter()
            .find(|c| c.day == "Sunday" && c.hour == 23)
            .unwrap();
        assert_eq!(sunday_23.value, 1);

        let total: u64 = cells.iter().map(|c| c.value).sum();
        assert_eq!(total, 3);
    }
}
