//! Boss lifecycle signals
//!
//! Observers (quest trackers, stats, logging) subscribe by implementing
//! `SignalHandler`. Signals are emitted synchronously on the heartbeat thread
//! and carry owned data, so handlers never borrow a live boss.

use crate::storage::LeaderboardEntry;
use crate::world::{EntityId, ItemStack, Location};

#[derive(Debug, Clone, PartialEq)]
pub enum BossSignal {
    Spawned {
        boss_id: EntityId,
        spawner_id: String,
        type_id: String,
        location: Location,
        timestamp: i64,
    },
    /// Forced removal; no rewards were paid
    Despawned {
        boss_id: EntityId,
        spawner_id: String,
        timestamp: i64,
    },
    Died {
        boss_id: EntityId,
        spawner_id: String,
        type_id: String,
        /// Where the entity died (and where drops were scattered)
        location: Location,
        drops: Vec<ItemStack>,
        leaderboard: Vec<LeaderboardEntry>,
        timestamp: i64,
    },
}

impl BossSignal {
    pub fn boss_id(&self) -> EntityId {
        match self {
            BossSignal::Spawned { boss_id, .. }
            | BossSignal::Despawned { boss_id, .. }
            | BossSignal::Died { boss_id, .. } => *boss_id,
        }
    }
}

/// Trait for systems that react to boss signals.
pub trait SignalHandler: Send {
    fn handle_signal(&mut self, signal: &BossSignal);

    /// Handle multiple signals (default implementation calls handle_signal for each)
    fn handle_signals(&mut self, signals: &[BossSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}

/// Logs every signal through `tracing`
#[derive(Debug, Default)]
pub struct TracingSignalHandler;

impl SignalHandler for TracingSignalHandler {
    fn handle_signal(&mut self, signal: &BossSignal) {
        match signal {
            BossSignal::Spawned {
                boss_id,
                spawner_id,
                type_id,
                location,
                ..
            } => {
                tracing::info!(%boss_id, %spawner_id, %type_id, %location, "Boss spawned");
            }
            BossSignal::Despawned {
                boss_id, spawner_id, ..
            } => {
                tracing::info!(%boss_id, %spawner_id, "Boss despawned");
            }
            BossSignal::Died {
                boss_id,
                spawner_id,
                drops,
                leaderboard,
                ..
            } => {
                tracing::info!(
                    %boss_id,
                    %spawner_id,
                    drops = drops.len(),
                    top = ?leaderboard.first().map(|e| e.player.as_str()),
                    "Boss died"
                );
            }
        }
    }
}
