//! Work-zone endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use validator::Validate;

use domain::models::zone::{ListZonesResponse, SetZoneRequest, ZoneResponse};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Identity;

/// Save the manager's work zone, deactivating their previous zones.
///
/// POST /api/v1/zones (manager only)
pub async fn set_zone(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<SetZoneRequest>,
) -> Result<(StatusCode, Json<ZoneResponse>), ApiError> {
    identity.require_manager()?;
    request.validate()?;

    let zone = state
        .store
        .set_zone(
            identity.user_id,
            &request.name,
            request.latitude,
            request.longitude,
            request.radius_km,
        )
        .await?;

    info!(
        zone_id = %zone.id,
        manager_id = %identity.user_id,
        name = %zone.name,
        radius_km = zone.radius_km,
        "Work zone saved"
    );

    Ok((StatusCode::CREATED, Json(zone.into())))
}

/// List the currently active zones.
///
/// GET /api/v1/zones
pub async fn list_zones(
    State(state): State<AppState>,
    _identity: Identity,
) -> Result<Json<ListZonesResponse>, ApiError> {
    let zones: Vec<ZoneResponse> = state
        .store
        .active_zones()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let total = zones.len();
    Ok(Json(ListZonesResponse { zones, total }))
}
