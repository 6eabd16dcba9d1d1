use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain::error::ShiftError;
use persistence::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already clocked in")]
    AlreadyClockedIn,

    #[error("Not currently clocked in")]
    NotClockedIn,

    #[error("Location is outside the allowed perimeter")]
    OutsidePerimeter { distance_m: Option<f64> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_m: Option<f64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut distance_m = None;
        let (status, error_code, message) = match &self {
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", msg.clone())
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::AlreadyClockedIn => (
                StatusCode::CONFLICT,
                "already_clocked_in",
                "Worker already has an open shift".into(),
            ),
            ApiError::NotClockedIn => (
                StatusCode::CONFLICT,
                "not_clocked_in",
                "Shift is not currently clocked in".into(),
            ),
            ApiError::OutsidePerimeter { distance_m: d } => {
                distance_m = *d;
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "outside_perimeter",
                    "Location is outside the allowed perimeter".into(),
                )
            }
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            distance_m,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShiftError> for ApiError {
    fn from(err: ShiftError) -> Self {
        match err {
            ShiftError::AlreadyClockedIn => ApiError::AlreadyClockedIn,
            ShiftError::OutsidePerimeter => ApiError::OutsidePerimeter { distance_m: None },
            ShiftError::NotClockedIn => ApiError::NotClockedIn,
            ShiftError::NotFound => ApiError::NotFound("Shift not found".into()),
            ShiftError::Unauthorized => {
                ApiError::Forbidden("Shift belongs to another worker".into())
            }
        }
    }
}

// Fallback mapping for store errors reaching a handler outside a guarded
// transition; clock-in/out handlers map Conflict to the precise domain error
// themselves.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Resource not found".into()),
            StoreError::Conflict(msg) => ApiError::Internal(format!("store conflict: {}", msg)),
            StoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.clone().map(|m| m.to_string()).unwrap_or_default()
                    )
                })
            })
            .collect();

        ApiError::Validation(details.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthenticated("no identity".into())
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("manager only".into())
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("missing".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::AlreadyClockedIn.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::NotClockedIn.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::OutsidePerimeter { distance_m: None }
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Validation("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_shift_error() {
        assert!(matches!(
            ApiError::from(ShiftError::AlreadyClockedIn),
            ApiError::AlreadyClockedIn
        ));
        assert!(matches!(
            ApiError::from(ShiftError::NotClockedIn),
            ApiError::NotClockedIn
        ));
        assert!(matches!(
            ApiError::from(ShiftError::Unauthorized),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn test_from_store_error() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Internal("io".into())),
            ApiError::Internal(_)
        ));
    }
}
