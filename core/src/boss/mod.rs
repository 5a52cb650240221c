//! Boss system
//!
//! This module provides:
//! - **BossType**: Immutable per-species descriptor loaded from TOML
//! - **Boss**: A live encounter with damage attribution and lifecycle hooks
//! - **Ability**: Variant behavior layered on the base tick (e.g. `Ravager`)
//! - **Rewards**: Payout split, kill announcement and leaderboard snapshot

mod ability;
mod damage;
mod definition;
mod loader;
mod reward;
mod state;

#[cfg(test)]
mod state_tests;

pub use ability::{Ability, RAVAGER_COOLDOWN_TICKS, RAVAGER_STRENGTH_TICKS, Ravager, lunge_velocity};
pub use damage::{DamageShare, DamageTracker};
pub use definition::{AbilityKind, BossType, BossTypeFile, RewardItem, StatProfile};
pub use loader::{BossTypeCatalog, load_boss_types, parse_boss_types};
pub use reward::{ANNOUNCED_RANKS, DeathReport, LEADERBOARD_SIZE, Payout, build_announcement, compute_payouts};
pub use state::Boss;
