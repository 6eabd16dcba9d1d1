//! Domain layer for the Workzone backend.
//!
//! This crate contains:
//! - Domain models (Zone, Shift, LocationSample, AnalyticsSnapshot)
//! - Typed domain errors for shift transitions
//! - Pure business services (geofence evaluation, analytics aggregation)

pub mod error;
pub mod models;
pub mod services;
