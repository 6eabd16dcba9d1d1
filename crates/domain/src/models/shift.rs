//! Shift domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::location::GeoPoint;

/// Shift lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    ClockedIn,
    ClockedOut,
}

impl ShiftStatus {
    /// Converts to storage string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::ClockedIn => "CLOCKED_IN",
            ShiftStatus::ClockedOut => "CLOCKED_OUT",
        }
    }

    /// Parses from storage string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CLOCKED_IN" => Some(ShiftStatus::ClockedIn),
            "CLOCKED_OUT" => Some(ShiftStatus::ClockedOut),
            _ => None,
        }
    }
}

/// Why a shift was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The worker clocked out themselves.
    Manual,
    /// The grace-period timer expired after a perimeter exit.
    AutoPerimeterExit,
}

impl CloseReason {
    /// Converts to storage string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Manual => "manual",
            CloseReason::AutoPerimeterExit => "auto_perimeter_exit",
        }
    }

    /// Parses from storage string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(CloseReason::Manual),
            "auto_perimeter_exit" => Some(CloseReason::AutoPerimeterExit),
            _ => None,
        }
    }
}

/// One worker's clocked interval.
///
/// Invariant: at most one shift with status `ClockedIn` exists per worker at
/// any time. Shifts are created on clock-in, mutated in place on clock-out
/// and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Uuid,
    pub worker_id: Uuid,
    /// Display name captured at clock-in, for analytics presentation.
    pub worker_name: String,
    pub status: ShiftStatus,
    pub clock_in_time: DateTime<Utc>,
    pub clock_in_location: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<CloseReason>,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.status == ShiftStatus::ClockedIn
    }

    /// Duration in fractional hours, present only for completed shifts.
    pub fn duration_hours(&self) -> Option<f64> {
        let end = self.clock_out_time?;
        Some((end - self.clock_in_time).num_milliseconds() as f64 / 3_600_000.0)
    }
}

/// Request payload for clocking in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClockInRequest {
    #[validate(nested)]
    pub location: GeoPoint,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Request payload for clocking out.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutRequest {
    #[validate(nested)]
    pub location: GeoPoint,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Response payload for shift operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftResponse {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub worker_name: String,
    pub status: ShiftStatus,
    pub clock_in_time: DateTime<Utc>,
    pub clock_in_location: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<CloseReason>,
}

impl From<Shift> for ShiftResponse {
    fn from(s: Shift) -> Self {
        Self {
            id: s.id,
            worker_id: s.worker_id,
            worker_name: s.worker_name,
            status: s.status,
            clock_in_time: s.clock_in_time,
            clock_in_location: s.clock_in_location,
            clock_in_notes: s.clock_in_notes,
            clock_out_time: s.clock_out_time,
            clock_out_location: s.clock_out_location,
            clock_out_notes: s.clock_out_notes,
            close_reason: s.close_reason,
        }
    }
}

/// Response for listing shifts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShiftsResponse {
    pub shifts: Vec<ShiftResponse>,
    pub total: usize,
}

/// Query parameters for listing shift history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShiftsQuery {
    /// Managers may read another worker's history; workers may not.
    pub worker_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn open_shift() -> Shift {
        Shift {
            id: Uuid::new_v4(),
            worker_id: Uuid::new_v4(),
            worker_name: "Alice".to_string(),
            status: ShiftStatus::ClockedIn,
            clock_in_time: Utc::now(),
            clock_in_location: GeoPoint::new(37.7749, -122.4194),
            clock_in_notes: None,
            clock_out_time: None,
            clock_out_location: None,
            clock_out_notes: None,
            close_reason: None,
        }
    }

    #[test]
    fn test_shift_status_round_trip() {
        assert_eq!(ShiftStatus::ClockedIn.as_str(), "CLOCKED_IN");
        assert_eq!(ShiftStatus::from_str("CLOCKED_OUT"), Some(ShiftStatus::ClockedOut));
        assert_eq!(ShiftStatus::from_str("unknown"), None);

        let json = serde_json::to_string(&ShiftStatus::ClockedIn).unwrap();
        assert_eq!(json, "\"CLOCKED_IN\"");
    }

    #[test]
    fn test_close_reason_round_trip() {
        assert_eq!(CloseReason::Manual.as_str(), "manual");
        assert_eq!(
            CloseReason::from_str("auto_perimeter_exit"),
            Some(CloseReason::AutoPerimeterExit)
        );
        assert_eq!(CloseReason::from_str("invalid"), None);

        let json = serde_json::to_string(&CloseReason::AutoPerimeterExit).unwrap();
        assert_eq!(json, "\"auto_perimeter_exit\"");
    }

    #[test]
    fn test_duration_hours_open_shift_is_none() {
        assert!(open_shift().duration_hours().is_none());
    }

    #[test]
    fn test_duration_hours_completed_shift() {
        let mut shift = open_shift();
        shift.clock_out_time = Some(shift.clock_in_time + Duration::minutes(90));
        shift.status = ShiftStatus::ClockedOut;
        let hours = shift.duration_hours().unwrap();
        assert!((hours - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_clock_in_request_deserialization() {
        let json = r#"{
            "location": {"latitude": 37.7749, "longitude": -122.4194, "accuracyM": 8.0},
            "notes": "Starting early"
        }"#;

        let request: ClockInRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.location.latitude, 37.7749);
        assert_eq!(request.notes.as_deref(), Some("Starting early"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_clock_in_request_rejects_bad_location() {
        let json = r#"{"location": {"latitude": 95.0, "longitude": 0.0}}"#;
        let request: ClockInRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_shift_response_omits_clock_out_fields_when_open() {
        let response: ShiftResponse = open_shift().into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"CLOCKED_IN\""));
        assert!(!json.contains("clockOutTime"));
        assert!(!json.contains("closeReason"));
    }
}
