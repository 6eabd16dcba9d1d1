//! In-process store implementation.
//!
//! A single `RwLock` guards all state; `open_shift`, `close_shift` and
//! `set_zone` take the write lock for their whole compare-and-transition,
//! which serializes shift transitions per worker and upholds the
//! at-most-one-open-shift invariant under concurrent callers.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use domain::models::location::GeoPoint;
use domain::models::shift::{CloseReason, Shift, ShiftStatus};
use domain::models::zone::Zone;

use crate::store::{ShiftStore, StoreError, ZoneStore};

#[derive(Default)]
struct Inner {
    zones: Vec<Zone>,
    shifts: HashMap<Uuid, Shift>,
    /// Insertion order of shift ids, for newest-first listings.
    shift_order: Vec<Uuid>,
}

/// In-memory implementation of the store contract.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ZoneStore for MemoryStore {
    async fn set_zone(
        &self,
        manager_id: Uuid,
        name: &str,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Zone, StoreError> {
        let mut inner = self.inner.write().await;

        for zone in inner.zones.iter_mut().filter(|z| z.manager_id == manager_id) {
            zone.active = false;
        }

        let zone = Zone {
            id: Uuid::new_v4(),
            manager_id,
            name: name.to_string(),
            latitude,
            longitude,
            radius_km,
            active: true,
            created_at: Utc::now(),
        };
        inner.zones.push(zone.clone());

        debug!(zone_id = %zone.id, manager_id = %manager_id, "Zone saved");
        Ok(zone)
    }

    async fn active_zones(&self) -> Result<Vec<Zone>, StoreError> {
        let inner = self.inner.read().await;
        let mut zones: Vec<Zone> = inner.zones.iter().filter(|z| z.active).cloned().collect();
        zones.reverse();
        Ok(zones)
    }
}

#[async_trait]
impl ShiftStore for MemoryStore {
    async fn open_shift(
        &self,
        worker_id: Uuid,
        worker_name: &str,
        location: GeoPoint,
        notes: Option<String>,
    ) -> Result<Shift, StoreError> {
        let mut inner = self.inner.write().await;

        let already_open = inner
            .shifts
            .values()
            .any(|s| s.worker_id == worker_id && s.status == ShiftStatus::ClockedIn);
        if already_open {
            return Err(StoreError::Conflict(
                "worker already has an open shift".to_string(),
            ));
        }

        let shift = Shift {
            id: Uuid::new_v4(),
            worker_id,
            worker_name: worker_name.to_string(),
            status: ShiftStatus::ClockedIn,
            clock_in_time: Utc::now(),
            clock_in_location: location,
            clock_in_notes: notes,
            clock_out_time: None,
            clock_out_location: None,
            clock_out_notes: None,
            close_reason: None,
        };
        inner.shifts.insert(shift.id, shift.clone());
        inner.shift_order.push(shift.id);

        debug!(shift_id = %shift.id, worker_id = %worker_id, "Shift opened");
        Ok(shift)
    }

    async fn close_shift(
        &self,
        shift_id: Uuid,
        worker_id: Uuid,
        location: GeoPoint,
        notes: Option<String>,
        reason: CloseReason,
    ) -> Result<Shift, StoreError> {
        let mut inner = self.inner.write().await;

        let shift = inner.shifts.get_mut(&shift_id).ok_or(StoreError::NotFound)?;
        if shift.worker_id != worker_id {
            return Err(StoreError::NotFound);
        }
        if shift.status != ShiftStatus::ClockedIn {
            return Err(StoreError::Conflict("shift is already closed".to_string()));
        }

        shift.status = ShiftStatus::ClockedOut;
        shift.clock_out_time = Some(Utc::now());
        shift.clock_out_location = Some(location);
        shift.clock_out_notes = notes;
        shift.close_reason = Some(reason);

        debug!(shift_id = %shift_id, reason = reason.as_str(), "Shift closed");
        Ok(shift.clone())
    }

    async fn find_shift(&self, shift_id: Uuid) -> Result<Option<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.shifts.get(&shift_id).cloned())
    }

    async fn open_shift_for_worker(&self, worker_id: Uuid) -> Result<Option<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shifts
            .values()
            .find(|s| s.worker_id == worker_id && s.status == ShiftStatus::ClockedIn)
            .cloned())
    }

    async fn shifts_for_worker(&self, worker_id: Uuid) -> Result<Vec<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shift_order
            .iter()
            .rev()
            .filter_map(|id| inner.shifts.get(id))
            .filter(|s| s.worker_id == worker_id)
            .cloned()
            .collect())
    }

    async fn open_shifts(&self) -> Result<Vec<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shift_order
            .iter()
            .rev()
            .filter_map(|id| inner.shifts.get(id))
            .filter(|s| s.status == ShiftStatus::ClockedIn)
            .cloned()
            .collect())
    }

    async fn all_shifts(&self) -> Result<Vec<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shift_order
            .iter()
            .filter_map(|id| inner.shifts.get(id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> GeoPoint {
        GeoPoint::new(37.7749, -122.4194)
    }

    #[tokio::test]
    async fn test_open_shift_enforces_single_open_invariant() {
        let store = MemoryStore::new();
        let worker = Uuid::new_v4();

        let first = store.open_shift(worker, "Alice", point(), None).await.unwrap();
        assert_eq!(first.status, ShiftStatus::ClockedIn);

        let second = store.open_shift(worker, "Alice", point(), None).await;
        assert!(matches!(second, Err(StoreError::Conflict(_))));

        // A different worker is unaffected.
        let other = store.open_shift(Uuid::new_v4(), "Bob", point(), None).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_close_shift_is_a_one_shot_transition() {
        let store = MemoryStore::new();
        let worker = Uuid::new_v4();
        let shift = store.open_shift(worker, "Alice", point(), None).await.unwrap();

        let closed = store
            .close_shift(shift.id, worker, point(), None, CloseReason::Manual)
            .await
            .unwrap();
        assert_eq!(closed.status, ShiftStatus::ClockedOut);
        assert_eq!(closed.close_reason, Some(CloseReason::Manual));
        assert!(closed.clock_out_time.is_some());

        // Second close loses the race.
        let again = store
            .close_shift(shift.id, worker, point(), None, CloseReason::AutoPerimeterExit)
            .await;
        assert!(matches!(again, Err(StoreError::Conflict(_))));

        // The stored record keeps the winner's reason.
        let stored = store.find_shift(shift.id).await.unwrap().unwrap();
        assert_eq!(stored.close_reason, Some(CloseReason::Manual));
    }

    #[tokio::test]
    async fn test_close_shift_checks_ownership() {
        let store = MemoryStore::new();
        let worker = Uuid::new_v4();
        let shift = store.open_shift(worker, "Alice", point(), None).await.unwrap();

        let other = store
            .close_shift(shift.id, Uuid::new_v4(), point(), None, CloseReason::Manual)
            .await;
        assert!(matches!(other, Err(StoreError::NotFound)));

        // Still open for the real owner.
        let open = store.open_shift_for_worker(worker).await.unwrap();
        assert!(open.is_some());
    }

    #[tokio::test]
    async fn test_reopen_after_close() {
        let store = MemoryStore::new();
        let worker = Uuid::new_v4();
        let shift = store.open_shift(worker, "Alice", point(), None).await.unwrap();
        store
            .close_shift(shift.id, worker, point(), None, CloseReason::Manual)
            .await
            .unwrap();

        let next = store.open_shift(worker, "Alice", point(), None).await;
        assert!(next.is_ok());

        let history = store.shifts_for_worker(worker).await.unwrap();
        assert_eq!(history.len(), 2);
        // Newest first.
        assert_eq!(history[0].status, ShiftStatus::ClockedIn);
        assert_eq!(history[1].status, ShiftStatus::ClockedOut);
    }

    #[tokio::test]
    async fn test_set_zone_deactivates_prior_zones_per_manager() {
        let store = MemoryStore::new();
        let manager = Uuid::new_v4();
        let other_manager = Uuid::new_v4();

        store
            .set_zone(manager, "Old Site", 37.0, -122.0, 0.5)
            .await
            .unwrap();
        store
            .set_zone(other_manager, "Other Site", 40.0, -74.0, 1.0)
            .await
            .unwrap();
        let newest = store
            .set_zone(manager, "New Site", 38.0, -121.0, 0.8)
            .await
            .unwrap();

        let active = store.active_zones().await.unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().any(|z| z.id == newest.id));
        assert!(active.iter().any(|z| z.manager_id == other_manager));
        assert!(!active.iter().any(|z| z.name == "Old Site"));
    }

    #[tokio::test]
    async fn test_open_shifts_listing() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let a = store.open_shift(alice, "Alice", point(), None).await.unwrap();
        store.open_shift(bob, "Bob", point(), None).await.unwrap();
        store
            .close_shift(a.id, alice, point(), None, CloseReason::Manual)
            .await
            .unwrap();

        let open = store.open_shifts().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].worker_id, bob);

        let all = store.all_shifts().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
