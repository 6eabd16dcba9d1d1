//! HTTP endpoint handlers.

pub mod analytics;
pub mod health;
pub mod shifts;
pub mod tracking;
pub mod zones;
