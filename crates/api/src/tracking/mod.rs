//! Live-tracking runtime.
//!
//! One tokio task per tracking session consumes that session's location
//! samples in arrival order, detects perimeter enter/exit transitions and
//! owns the grace-period countdown that enforces the automatic clock-out.
//! Because a session's state lives entirely inside its task, arming and
//! cancelling the countdown are atomic with respect to transition detection.

pub mod manager;
pub mod session;

pub use manager::{SessionManager, TrackingError};
pub use session::SessionEvent;
