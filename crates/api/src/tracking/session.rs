//! Per-session tracking task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval_at, Instant, Interval};
use tracing::{debug, info, warn};
use uuid::Uuid;

use domain::models::location::{GeoPoint, LocationSample};
use domain::models::shift::CloseReason;
use domain::services::geofence;
use persistence::{Store, StoreError};

use crate::config::TrackingConfig;

/// Notes recorded on shifts closed by the grace-period timer.
pub const AUTO_CLOCKOUT_NOTES: &str = "Auto clock-out due to leaving work zone";

/// Commands accepted by a session task.
#[derive(Debug)]
pub(crate) enum SessionCommand {
    Sample(LocationSample),
    /// Bind or unbind the worker's active shift.
    BindShift(Option<Uuid>),
    Stop,
}

/// Events emitted by a session task, exactly one per state change.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PerimeterEntered { nearest_m: Option<f64> },
    PerimeterExited { nearest_m: Option<f64> },
    /// Fires once per second while the grace-period countdown is armed.
    CountdownTick { remaining_secs: u64 },
    CountdownCancelled,
    AutoClockedOut { shift_id: Uuid },
}

struct Countdown {
    remaining_secs: u64,
    ticker: Interval,
}

/// Session-local state, owned exclusively by the session task.
pub(crate) struct SessionTask {
    session_id: Uuid,
    worker_id: Uuid,
    store: Arc<dyn Store>,
    config: TrackingConfig,
    events: broadcast::Sender<SessionEvent>,
    shift_id: Option<Uuid>,
    last_within: Option<bool>,
    last_point: Option<GeoPoint>,
    countdown: Option<Countdown>,
}

impl SessionTask {
    pub(crate) fn new(
        session_id: Uuid,
        worker_id: Uuid,
        shift_id: Option<Uuid>,
        store: Arc<dyn Store>,
        config: TrackingConfig,
        events: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            session_id,
            worker_id,
            store,
            config,
            events,
            shift_id,
            last_within: None,
            last_point: None,
            countdown: None,
        }
    }

    /// Drives the session until stopped or disconnected.
    pub(crate) async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) {
        debug!(session_id = %self.session_id, worker_id = %self.worker_id, "Session started");

        enum Wake {
            Command(Option<SessionCommand>),
            Tick,
        }

        loop {
            let wake = if let Some(countdown) = self.countdown.as_mut() {
                tokio::select! {
                    command = commands.recv() => Wake::Command(command),
                    _ = countdown.ticker.tick() => Wake::Tick,
                }
            } else {
                Wake::Command(commands.recv().await)
            };

            let command = match wake {
                Wake::Tick => {
                    self.on_countdown_tick().await;
                    continue;
                }
                Wake::Command(command) => command,
            };

            match command {
                Some(SessionCommand::Sample(sample)) => self.on_sample(sample).await,
                Some(SessionCommand::BindShift(shift_id)) => {
                    debug!(session_id = %self.session_id, ?shift_id, "Shift binding updated");
                    self.shift_id = shift_id;
                    if shift_id.is_none() {
                        // No shift left to enforce; a pending countdown is moot.
                        self.cancel_countdown();
                    }
                }
                Some(SessionCommand::Stop) | None => break,
            }
        }

        debug!(session_id = %self.session_id, "Session stopped");
    }

    /// Processes one location sample: evaluates the perimeter and emits a
    /// transition event only when the inside/outside status changed.
    async fn on_sample(&mut self, sample: LocationSample) {
        let zones = match self.store.active_zones().await {
            Ok(zones) => zones,
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Failed to load zones, sample dropped");
                return;
            }
        };

        // Accuracy never gates the decision; poor fixes are only surfaced.
        if let Some(accuracy) = sample.point.accuracy_m {
            if accuracy > self.config.accuracy_warn_threshold_m {
                warn!(
                    session_id = %self.session_id,
                    accuracy_m = accuracy,
                    "Location sample accuracy above threshold, accepted as-is"
                );
            }
        }

        let within = geofence::is_within(&sample.point, &zones);
        self.last_point = Some(sample.point);

        let previous = self.last_within.replace(within);
        if previous == Some(within) {
            return; // no boundary crossing
        }

        let nearest_m = geofence::nearest_distance_m(&sample.point, &zones);
        if within {
            self.emit(SessionEvent::PerimeterEntered { nearest_m });
            self.cancel_countdown();
        } else {
            self.emit(SessionEvent::PerimeterExited { nearest_m });
            if self.shift_id.is_some() {
                if self.config.grace_period_secs == 0 {
                    // Zero grace: nothing to count down, enforce on the spot.
                    self.fire_auto_clockout().await;
                } else {
                    self.arm_countdown();
                }
            }
        }
    }

    /// Arms the grace-period countdown. A no-op when already armed; the
    /// running clock is never reset. Callers handle a zero grace period
    /// before arming, so `remaining_secs` starts at 1 or more.
    fn arm_countdown(&mut self) {
        if self.countdown.is_some() {
            debug!(session_id = %self.session_id, "Countdown already armed");
            return;
        }

        let grace = self.config.grace_period_secs;
        let period = Duration::from_secs(1);
        self.countdown = Some(Countdown {
            remaining_secs: grace,
            ticker: interval_at(Instant::now() + period, period),
        });

        info!(session_id = %self.session_id, grace_secs = grace, "Auto clock-out countdown armed");
        self.emit(SessionEvent::CountdownTick {
            remaining_secs: grace,
        });
    }

    /// Clears an armed countdown. Safe to call when nothing is armed.
    fn cancel_countdown(&mut self) {
        if self.countdown.take().is_some() {
            info!(session_id = %self.session_id, "Auto clock-out countdown cancelled");
            self.emit(SessionEvent::CountdownCancelled);
        }
    }

    async fn on_countdown_tick(&mut self) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        if countdown.remaining_secs == 0 {
            self.countdown = None;
            self.fire_auto_clockout().await;
        } else {
            let remaining_secs = countdown.remaining_secs;
            self.emit(SessionEvent::CountdownTick { remaining_secs });
        }
    }

    /// Best-effort enforcement on expiry. The store transition is the single
    /// arbiter of the race against a concurrent manual clock-out; losing it
    /// means the shift is already closed, which is the outcome we wanted.
    async fn fire_auto_clockout(&mut self) {
        let Some(shift_id) = self.shift_id.take() else {
            return;
        };
        let Some(location) = self.last_point else {
            return;
        };

        let result = self
            .store
            .close_shift(
                shift_id,
                self.worker_id,
                location,
                Some(AUTO_CLOCKOUT_NOTES.to_string()),
                CloseReason::AutoPerimeterExit,
            )
            .await;

        match result {
            Ok(_) => {
                info!(
                    session_id = %self.session_id,
                    shift_id = %shift_id,
                    "Shift closed automatically after grace period"
                );
                self.emit(SessionEvent::AutoClockedOut { shift_id });
            }
            Err(StoreError::Conflict(_)) | Err(StoreError::NotFound) => {
                debug!(
                    session_id = %self.session_id,
                    shift_id = %shift_id,
                    "Auto clock-out lost the race, shift already closed"
                );
            }
            Err(e) => {
                warn!(
                    session_id = %self.session_id,
                    shift_id = %shift_id,
                    error = %e,
                    "Auto clock-out failed"
                );
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine; events are advisory.
        let _ = self.events.send(event);
    }
}
