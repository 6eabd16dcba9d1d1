//! Typed errors for clock-in / clock-out transitions.

use thiserror::Error;

/// Guard failures for shift transitions.
///
/// Every variant is reported synchronously to the caller; the only place a
/// `NotClockedIn` is swallowed is the auto clock-out timer losing the race
/// against a concurrent manual clock-out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShiftError {
    #[error("Worker already has an open shift")]
    AlreadyClockedIn,

    #[error("Location is outside the allowed perimeter")]
    OutsidePerimeter,

    #[error("Shift is not currently clocked in")]
    NotClockedIn,

    #[error("Shift not found")]
    NotFound,

    #[error("Shift belongs to another worker")]
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_error_display() {
        assert_eq!(
            ShiftError::AlreadyClockedIn.to_string(),
            "Worker already has an open shift"
        );
        assert_eq!(
            ShiftError::OutsidePerimeter.to_string(),
            "Location is outside the allowed perimeter"
        );
        assert_eq!(
            ShiftError::NotClockedIn.to_string(),
            "Shift is not currently clocked in"
        );
    }
}
