//! Spawner system
//!
//! This module provides:
//! - **Spawner**: Anchored slot that keeps one boss alive or counts down to the next
//! - **SpawnerManager**: Owns every spawner and routes heartbeats and combat events
//! - **BossRegistry**: Index of alive bosses by entity id
//! - **Persistence**: `[[spawner]]` TOML records

mod countdown;
mod error;
mod manager;
mod persist;
mod registry;
mod state;

#[cfg(test)]
mod manager_tests;

pub use countdown::format_remaining;
pub use error::SpawnerError;
pub use manager::SpawnerManager;
pub use persist::{load_spawner_file, save_spawner_file};
pub use registry::{AliveBoss, BossRegistry};
pub use state::Spawner;
