//! Shared utilities for the Workzone backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Coordinate, accuracy and geofence-radius validation

pub mod validation;
