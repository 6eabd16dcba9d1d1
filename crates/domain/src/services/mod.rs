//! Pure domain services.

pub mod analytics;
pub mod geofence;
