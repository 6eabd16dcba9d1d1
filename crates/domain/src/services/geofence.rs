//! Geofence evaluation.
//!
//! Pure point-in-circle tests against the active zone set. Deterministic for
//! identical inputs; no I/O.

use crate::models::location::GeoPoint;
use crate::models::zone::Zone;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters (haversine).
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Whether the zone is eligible for perimeter checks.
///
/// Inactive zones and zones with a non-positive radius never match.
fn zone_in_play(zone: &Zone) -> bool {
    zone.active && zone.radius_km > 0.0
}

/// True iff the point lies within the radius of any eligible zone.
///
/// Union semantics over the zone set; an empty set is always outside.
pub fn is_within(point: &GeoPoint, zones: &[Zone]) -> bool {
    zones.iter().filter(|z| zone_in_play(z)).any(|zone| {
        let distance =
            haversine_distance_m(point.latitude, point.longitude, zone.latitude, zone.longitude);
        distance <= zone.radius_km * 1000.0
    })
}

/// Distance in meters to the nearest eligible zone center, if any exist.
pub fn nearest_distance_m(point: &GeoPoint, zones: &[Zone]) -> Option<f64> {
    zones
        .iter()
        .filter(|z| zone_in_play(z))
        .map(|zone| {
            haversine_distance_m(point.latitude, point.longitude, zone.latitude, zone.longitude)
        })
        .min_by(|a, b| a.total_cmp(b))
}
