//! Durable-store contract.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use domain::models::location::GeoPoint;
use domain::models::shift::{CloseReason, Shift};
use domain::models::zone::Zone;

/// Storage-layer failures. Propagated upward unmodified; the API layer maps
/// them onto the domain error taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store failure: {0}")]
    Internal(String),
}

/// Combined store handle used by the API layer.
pub trait Store: ZoneStore + ShiftStore {}

impl<T: ZoneStore + ShiftStore> Store for T {}

/// Work-zone persistence.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Saves a zone for a manager, atomically deactivating the manager's
    /// prior zones (last-write-wins, enforced at write time).
    async fn set_zone(
        &self,
        manager_id: Uuid,
        name: &str,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Zone, StoreError>;

    /// All currently active zones, newest first.
    async fn active_zones(&self) -> Result<Vec<Zone>, StoreError>;
}

/// Shift persistence.
///
/// `open_shift` and `close_shift` are the two guarded transitions of the
/// shift state machine; both are atomic with respect to each other, which
/// makes the store the single arbiter of the manual-vs-automatic clock-out
/// race.
#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// Creates a `CLOCKED_IN` shift. Fails with `Conflict` when the worker
    /// already has an open shift.
    async fn open_shift(
        &self,
        worker_id: Uuid,
        worker_name: &str,
        location: GeoPoint,
        notes: Option<String>,
    ) -> Result<Shift, StoreError>;

    /// Transitions a shift to `CLOCKED_OUT`. Fails with `NotFound` when the
    /// shift does not exist or belongs to another worker, and with
    /// `Conflict` when it is already closed.
    async fn close_shift(
        &self,
        shift_id: Uuid,
        worker_id: Uuid,
        location: GeoPoint,
        notes: Option<String>,
        reason: CloseReason,
    ) -> Result<Shift, StoreError>;

    async fn find_shift(&self, shift_id: Uuid) -> Result<Option<Shift>, StoreError>;

    /// The worker's open shift, if any.
    async fn open_shift_for_worker(&self, worker_id: Uuid) -> Result<Option<Shift>, StoreError>;

    /// The worker's full history, newest first.
    async fn shifts_for_worker(&self, worker_id: Uuid) -> Result<Vec<Shift>, StoreError>;

    /// All currently open shifts, newest first.
    async fn open_shifts(&self) -> Result<Vec<Shift>, StoreError>;

    /// The complete shift history, for analytics aggregation.
    async fn all_shifts(&self) -> Result<Vec<Shift>, StoreError>;
}
