//! Persistence layer for the Workzone backend.
//!
//! This crate contains:
//! - The narrow durable-store contract (`ZoneStore`, `ShiftStore`)
//! - An in-process implementation backing the server and the test suite
//!
//! Store engine design is deliberately out of scope; the contract guarantees
//! read-after-write consistency and atomic single-record transitions, which
//! is everything the shift state machine relies on.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{ShiftStore, Store, StoreError, ZoneStore};
