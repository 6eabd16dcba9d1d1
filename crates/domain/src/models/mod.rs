//! Domain models.

pub mod analytics;
pub mod location;
pub mod shift;
pub mod zone;

pub use analytics::AnalyticsSnapshot;
pub use location::{GeoPoint, LocationSample};
pub use shift::{CloseReason, Shift, ShiftStatus};
pub use zone::Zone;
