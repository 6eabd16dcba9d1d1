//! Work-zone (geofence) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A circular geofence within which clock-in is permitted.
///
/// Zones are owned by a manager; saving a new zone deactivates the manager's
/// prior zones, so at most the most-recently-saved zone per manager is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for saving a work zone.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetZoneRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    #[validate(custom(function = "shared::validation::validate_radius_km"))]
    pub radius_km: f64,
}

/// Response payload for zone operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResponse {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Zone> for ZoneResponse {
    fn from(z: Zone) -> Self {
        Self {
            id: z.id,
            manager_id: z.manager_id,
            name: z.name,
            latitude: z.latitude,
            longitude: z.longitude,
            radius_km: z.radius_km,
            active: z.active,
            created_at: z.created_at,
        }
    }
}

/// Response for listing active zones.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListZonesResponse {
    pub zones: Vec<ZoneResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(radius_km: f64) -> SetZoneRequest {
        SetZoneRequest {
            name: "Main Site".to_string(),
            latitude: 37.7749,
            longitude: -122.4194,
            radius_km,
        }
    }

    #[test]
    fn test_set_zone_request_deserialization() {
        let json = r#"{
            "name": "Main Site",
            "latitude": 37.7749,
            "longitude": -122.4194,
            "radiusKm": 0.5
        }"#;

        let request: SetZoneRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Main Site");
        assert_eq!(request.latitude, 37.7749);
        assert_eq!(request.radius_km, 0.5);
    }

    #[test]
    fn test_set_zone_request_validation() {
        assert!(request(0.5).validate().is_ok());
        assert!(request(0.0).validate().is_err());
        assert!(request(-1.0).validate().is_err());

        let mut bad_name = request(0.5);
        bad_name.name = String::new();
        assert!(bad_name.validate().is_err());

        let mut bad_lat = request(0.5);
        bad_lat.latitude = 123.0;
        assert!(bad_lat.validate().is_err());
    }

    #[test]
    fn test_zone_response_serialization() {
        let zone = Zone {
            id: Uuid::new_v4(),
            manager_id: Uuid::new_v4(),
            name: "Depot".to_string(),
            latitude: 45.0,
            longitude: -120.0,
            radius_km: 1.5,
            active: true,
            created_at: Utc::now(),
        };

        let response: ZoneResponse = zone.into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"name\":\"Depot\""));
        assert!(json.contains("\"radiusKm\":1.5"));
        assert!(json.contains("\"active\":true"));
    }
}
