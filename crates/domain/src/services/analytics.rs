//! Shift analytics aggregation.
//!
//! A pure function over the shift history plus "now". The weekly window is
//! the set of completed shifts (both timestamps present) that clocked in
//! within the trailing 7 days; open shifts never contribute hours.

use chrono::{DateTime, Duration, Utc};

use crate::models::analytics::{AnalyticsSnapshot, DailyClockIns, WorkerHours};
use crate::models::shift::Shift;

/// Rounds to 2 decimal places for presentation stability.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the analytics snapshot for the given shift history.
pub fn compute_snapshot(shifts: &[Shift], now: DateTime<Utc>) -> AnalyticsSnapshot {
    let week_start = now - Duration::days(7);
    let today = now.date_naive();

    // Completed shifts clocking in within the trailing week.
    let weekly: Vec<&Shift> = shifts
        .iter()
        .filter(|s| s.clock_out_time.is_some() && s.clock_in_time >= week_start)
        .collect();

    let total_hours_today: f64 = weekly
        .iter()
        .filter(|s| s.clock_in_time.date_naive() == today)
        .filter_map(|s| s.duration_hours())
        .sum();

    let weekly_total: f64 = weekly.iter().filter_map(|s| s.duration_hours()).sum();
    // Flat divisor of 7, matching the produced behavior even on sparse weeks.
    let average_hours_per_day = if weekly.is_empty() {
        0.0
    } else {
        weekly_total / 7.0
    };

    let daily_clock_ins = (0..7)
        .rev()
        .map(|offset| {
            let date = (now - Duration::days(offset)).date_naive();
            let count = weekly
                .iter()
                .filter(|s| s.clock_in_time.date_naive() == date)
                .count() as u32;
            DailyClockIns {
                date: date.format("%Y-%m-%d").to_string(),
                count,
            }
        })
        .collect();

    // Grouped by worker id, first-seen order; the display name rides along
    // for presentation.
    let mut weekly_hours: Vec<WorkerHours> = Vec::new();
    for shift in &weekly {
        let Some(hours) = shift.duration_hours() else {
            continue;
        };
        match weekly_hours.iter_mut().find(|w| w.worker_id == shift.worker_id) {
            Some(entry) => entry.hours += hours,
            None => weekly_hours.push(WorkerHours {
                worker_id: shift.worker_id,
                worker_name: shift.worker_name.clone(),
                hours,
            }),
        }
    }
    for entry in &mut weekly_hours {
        entry.hours = round2(entry.hours);
    }

    let total_staff_clocked_in = shifts.iter().filter(|s| s.is_open()).count() as u32;

    AnalyticsSnapshot {
        total_hours_today: round2(total_hours_today),
        average_hours_per_day: round2(average_hours_per_day),
        total_staff_clocked_in,
        daily_clock_ins,
        weekly_hours,
    }
}
