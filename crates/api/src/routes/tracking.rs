//! Live-tracking endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::location::{GeoPoint, LocationSample};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Identity;
use crate::tracking::TrackingError;

/// Request payload for a streamed location update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StreamLocationRequest {
    #[validate(nested)]
    pub location: GeoPoint,

    /// Client-side capture time; defaults to arrival time.
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Response payload for starting a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: Uuid,
}

/// Start a tracking session for the caller, bound to their open shift if
/// one exists.
///
/// POST /api/v1/tracking/sessions
pub async fn start_session(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<(StatusCode, Json<StartSessionResponse>), ApiError> {
    let shift_id = state
        .store
        .open_shift_for_worker(identity.user_id)
        .await?
        .map(|s| s.id);

    let session_id = state.sessions.start(identity.user_id, shift_id).await;
    Ok((StatusCode::CREATED, Json(StartSessionResponse { session_id })))
}

/// Fire-and-forget location ingestion driving the perimeter monitor.
///
/// POST /api/v1/tracking/sessions/:session_id/locations
pub async fn stream_location(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<Uuid>,
    Json(request): Json<StreamLocationRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    let sample = LocationSample::new(
        request.location,
        request.recorded_at.unwrap_or_else(Utc::now),
    );

    state
        .sessions
        .ingest(session_id, identity.user_id, sample)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::ACCEPTED)
}

/// Stop a tracking session. Idempotent.
///
/// DELETE /api/v1/tracking/sessions/:session_id
pub async fn stop_session(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .stop(session_id, identity.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

impl From<TrackingError> for ApiError {
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::UnknownSession => {
                ApiError::NotFound("Tracking session not found".to_string())
            }
            TrackingError::NotOwner => {
                ApiError::Forbidden("Tracking session belongs to another worker".to_string())
            }
        }
    }
}
