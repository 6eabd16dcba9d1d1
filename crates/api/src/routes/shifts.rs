//! Shift endpoint handlers: the guarded clock-in / clock-out transitions
//! plus history and live-status listings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::shift::{
    ClockInRequest, ClockOutRequest, CloseReason, ListShiftsQuery, ListShiftsResponse,
    ShiftResponse,
};
use domain::services::geofence;
use persistence::StoreError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Identity;

/// Clock in.
///
/// POST /api/v1/shifts/clock-in
pub async fn clock_in(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<ClockInRequest>,
) -> Result<(StatusCode, Json<ShiftResponse>), ApiError> {
    request.validate()?;

    // Guard order matters: an already-open shift rejects regardless of
    // location, before any perimeter evaluation.
    if state
        .store
        .open_shift_for_worker(identity.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::AlreadyClockedIn);
    }

    let zones = state.store.active_zones().await?;
    if !geofence::is_within(&request.location, &zones) {
        return Err(ApiError::OutsidePerimeter {
            distance_m: geofence::nearest_distance_m(&request.location, &zones),
        });
    }

    let shift = state
        .store
        .open_shift(
            identity.user_id,
            &identity.display_name,
            request.location,
            request.notes,
        )
        .await
        .map_err(|e| match e {
            // Lost a concurrent clock-in race; the store is the arbiter.
            StoreError::Conflict(_) => ApiError::AlreadyClockedIn,
            other => other.into(),
        })?;

    // Arm live sessions of this worker so a perimeter exit is enforced.
    state
        .sessions
        .bind_worker_shift(identity.user_id, Some(shift.id))
        .await;

    info!(shift_id = %shift.id, worker_id = %identity.user_id, "Worker clocked in");
    Ok((StatusCode::CREATED, Json(shift.into())))
}

/// Clock out. No perimeter check: a worker may clock out from anywhere.
///
/// POST /api/v1/shifts/:shift_id/clock-out
pub async fn clock_out(
    State(state): State<AppState>,
    identity: Identity,
    Path(shift_id): Path<Uuid>,
    Json(request): Json<ClockOutRequest>,
) -> Result<Json<ShiftResponse>, ApiError> {
    request.validate()?;

    let existing = state
        .store
        .find_shift(shift_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Shift not found".to_string()))?;
    if existing.worker_id != identity.user_id {
        return Err(ApiError::Forbidden(
            "Shift belongs to another worker".to_string(),
        ));
    }

    let shift = state
        .store
        .close_shift(
            shift_id,
            identity.user_id,
            request.location,
            request.notes,
            CloseReason::Manual,
        )
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => ApiError::NotClockedIn,
            StoreError::NotFound => ApiError::NotFound("Shift not found".to_string()),
            other => other.into(),
        })?;

    state
        .sessions
        .bind_worker_shift(identity.user_id, None)
        .await;

    info!(shift_id = %shift.id, worker_id = %identity.user_id, "Worker clocked out");
    Ok(Json(shift.into()))
}

/// Shift history, newest first. Managers may read any worker's history.
///
/// GET /api/v1/shifts?workerId=<uuid>
pub async fn list_shifts(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<ListShiftsQuery>,
) -> Result<Json<ListShiftsResponse>, ApiError> {
    let target = query.worker_id.unwrap_or(identity.user_id);
    if target != identity.user_id && !identity.is_manager() {
        return Err(ApiError::Forbidden(
            "Workers may only view their own shifts".to_string(),
        ));
    }

    let shifts: Vec<ShiftResponse> = state
        .store
        .shifts_for_worker(target)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let total = shifts.len();
    Ok(Json(ListShiftsResponse { shifts, total }))
}

/// All currently open shifts.
///
/// GET /api/v1/shifts/active (manager only)
pub async fn active_shifts(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ListShiftsResponse>, ApiError> {
    identity.require_manager()?;

    let shifts: Vec<ShiftResponse> = state
        .store
        .open_shifts()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let total = shifts.len();
    Ok(Json(ListShiftsResponse { shifts, total }))
}
