//! Kill record persistence.
//!
//! When a boss dies the core builds an owned `KillRecord` snapshot and submits
//! it to a `KillSink`. The default sink is an unbounded channel drained by a
//! blocking worker that appends JSON lines to a `KillStore`, so the heartbeat
//! never waits on disk I/O.

mod error;
mod record;
mod writer;

pub use error::StorageError;
pub use record::{KillRecord, LeaderboardEntry};
pub use writer::{JsonlKillStore, KillQueue, KillSink, KillStore, spawn_kill_writer};
