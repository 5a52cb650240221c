use serde::{Deserialize, Serialize};

/// One row of a kill leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub damage: i64,
}

/// Immutable summary of a boss kill, keyed by the boss id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillRecord {
    pub boss_id: String,
    /// Unix time in milliseconds
    pub timestamp: i64,
    /// Top damage dealers, highest first
    pub top: Vec<LeaderboardEntry>,
}
