//! Location domain models.
//!
//! `GeoPoint` is persisted on shifts; `LocationSample` is ephemeral and only
//! ever flows through the perimeter monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A geographic coordinate with optional reported GPS accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    /// Reported accuracy radius in meters. Reported to callers but never a
    /// gate for perimeter decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "shared::validation::validate_accuracy"))]
    pub accuracy_m: Option<f64>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }
}

/// A single live-tracking location update. Consumed transiently, not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSample {
    pub point: GeoPoint,
    pub recorded_at: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(point: GeoPoint, recorded_at: DateTime<Utc>) -> Self {
        Self { point, recorded_at }
    }
}
