//! Shift analytics endpoint handlers.

use axum::{extract::State, Json};
use chrono::Utc;

use domain::models::analytics::AnalyticsSnapshot;
use domain::services::analytics;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Identity;

/// Time-bucketed shift analytics over the stored history.
///
/// GET /api/v1/analytics/shifts (manager only)
pub async fn shift_analytics(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<AnalyticsSnapshot>, ApiError> {
    identity.require_manager()?;

    let shifts = state.store.all_shifts().await?;
    Ok(Json(analytics::compute_snapshot(&shifts, Utc::now())))
}
