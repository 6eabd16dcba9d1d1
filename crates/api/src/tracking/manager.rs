//! Tracking session registry.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use domain::models::location::LocationSample;
use persistence::Store;

use crate::config::TrackingConfig;
use crate::tracking::session::{SessionCommand, SessionEvent, SessionTask};

/// Capacity of the per-session command channel.
const COMMAND_BUFFER: usize = 64;

/// Failures surfaced by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackingError {
    #[error("tracking session not found")]
    UnknownSession,

    #[error("tracking session belongs to another worker")]
    NotOwner,
}

struct SessionHandle {
    worker_id: Uuid,
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
    task: JoinHandle<()>,
}

/// Registry of live tracking sessions.
///
/// Sessions are independent: each has its own command channel and task, so
/// ordering is guaranteed within a session and nothing blocks across them.
pub struct SessionManager {
    store: Arc<dyn Store>,
    config: TrackingConfig,
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn Store>, config: TrackingConfig) -> Self {
        Self {
            store,
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Spawns a session task for a worker, optionally bound to their open
    /// shift, and returns the session id.
    pub async fn start(&self, worker_id: Uuid, shift_id: Option<Uuid>) -> Uuid {
        let session_id = Uuid::new_v4();
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (events_tx, _) = broadcast::channel(self.config.event_buffer);

        let task = SessionTask::new(
            session_id,
            worker_id,
            shift_id,
            Arc::clone(&self.store),
            self.config.clone(),
            events_tx.clone(),
        );
        let handle = tokio::spawn(task.run(commands_rx));

        self.sessions.write().await.insert(
            session_id,
            SessionHandle {
                worker_id,
                commands: commands_tx,
                events: events_tx,
                task: handle,
            },
        );

        info!(session_id = %session_id, worker_id = %worker_id, ?shift_id, "Tracking session started");
        session_id
    }

    /// Queues a location sample for the session. Non-blocking: a full
    /// channel drops the sample rather than stalling ingestion.
    pub async fn ingest(
        &self,
        session_id: Uuid,
        worker_id: Uuid,
        sample: LocationSample,
    ) -> Result<(), TrackingError> {
        let sessions = self.sessions.read().await;
        let handle = sessions
            .get(&session_id)
            .ok_or(TrackingError::UnknownSession)?;
        if handle.worker_id != worker_id {
            return Err(TrackingError::NotOwner);
        }

        match handle.commands.try_send(SessionCommand::Sample(sample)) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(session_id = %session_id, "Session backlog full, sample dropped");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(TrackingError::UnknownSession),
        }
    }

    /// Updates the shift binding on every live session of the worker.
    /// Called on clock-in (bind) and manual clock-out (unbind).
    pub async fn bind_worker_shift(&self, worker_id: Uuid, shift_id: Option<Uuid>) {
        let sessions = self.sessions.read().await;
        for handle in sessions.values().filter(|h| h.worker_id == worker_id) {
            let _ = handle
                .commands
                .send(SessionCommand::BindShift(shift_id))
                .await;
        }
    }

    /// Tears down a session. Idempotent: stopping an unknown session is a
    /// no-op reported as `Ok(false)`.
    pub async fn stop(&self, session_id: Uuid, worker_id: Uuid) -> Result<bool, TrackingError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&session_id) {
            None => return Ok(false),
            Some(handle) if handle.worker_id != worker_id => {
                return Err(TrackingError::NotOwner);
            }
            Some(_) => {}
        }

        if let Some(handle) = sessions.remove(&session_id) {
            let _ = handle.commands.try_send(SessionCommand::Stop);
            handle.task.abort();
            debug!(session_id = %session_id, "Tracking session stopped");
        }
        Ok(true)
    }

    /// Subscribes to the session's event stream (perimeter transitions,
    /// countdown progress, auto clock-outs).
    pub async fn subscribe(
        &self,
        session_id: Uuid,
    ) -> Option<broadcast::Receiver<SessionEvent>> {
        let sessions = self.sessions.read().await;
        sessions.get(&session_id).map(|h| h.events.subscribe())
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
