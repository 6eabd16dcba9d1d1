//! Shift analytics models. Computed on demand, never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clock-in count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyClockIns {
    /// ISO calendar date (`YYYY-MM-DD`, UTC).
    pub date: String,
    pub count: u32,
}

/// Completed hours over the trailing week for one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerHours {
    pub worker_id: Uuid,
    pub worker_name: String,
    pub hours: f64,
}

/// Time-bucketed shift analytics derived from the shift history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Completed hours for shifts that clocked in today (UTC).
    pub total_hours_today: f64,
    /// Trailing-7-day completed hours divided by a flat 7.
    pub average_hours_per_day: f64,
    /// Live count of open shifts, not time-windowed.
    pub total_staff_clocked_in: u32,
    /// Trailing 7 calendar days, oldest first.
    pub daily_clock_ins: Vec<DailyClockIns>,
    pub weekly_hours: Vec<WorkerHours>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = AnalyticsSnapshot {
            total_hours_today: 15.5,
            average_hours_per_day: 2.21,
            total_staff_clocked_in: 3,
            daily_clock_ins: vec![DailyClockIns {
                date: "2026-08-23".to_string(),
                count: 2,
            }],
            weekly_hours: vec![WorkerHours {
                worker_id: Uuid::new_v4(),
                worker_name: "Alice".to_string(),
                hours: 8.0,
            }],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"totalHoursToday\":15.5"));
        assert!(json.contains("\"totalStaffClockedIn\":3"));
        assert!(json.contains("\"dailyClockIns\""));
        assert!(json.contains("\"date\":\"2026-08-23\""));
    }
}
