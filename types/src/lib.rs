//! Shared configuration types for lair
//!
//! This crate contains serializable configuration types that are shared between
//! the simulation core (lair-core) and the command line front end (lair-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Spawner Records
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted shape of a spawner.
///
/// Keys are camelCase so files written by older tooling keep loading.
/// `location` is an opaque `world,x,y,z` string, `interval` and `respawnAt`
/// are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnerRecord {
    pub id: String,
    pub display_name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub boss_type: String,
    pub health: f64,
    pub damage: f64,
    pub interval: i64,
    #[serde(default = "default_true")]
    pub show_hologram: bool,
    #[serde(default)]
    pub respawn_at: i64,
}

/// Root structure of a spawner file (TOML).
///
/// ```toml
/// [[spawner]]
/// id = "north_gate"
/// displayName = "Gatekeeper"
/// location = "overworld,120.5,64,-33"
/// type = "ravager"
/// health = 600.0
/// damage = 12.0
/// interval = 600000
/// showHologram = true
/// respawnAt = 0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnerFile {
    #[serde(default, rename = "spawner")]
    pub spawners: Vec<SpawnerRecord>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// Announcement and countdown templates.
///
/// Placeholders:
/// - header/footer: `%displayname%` (spawner name), `%money%` (total reward)
/// - top line: `%displayname%` (player), `%earned%`, `%percentage%`, `%damage%`
/// - others line: `%amount%`
/// - hologram countdown: `%displayname%`, `%time%`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_killed_header")]
    pub killed_header: Vec<String>,
    #[serde(default = "default_top_format")]
    pub top_format: String,
    #[serde(default = "default_killed_other")]
    pub killed_other: String,
    #[serde(default = "default_killed_footer")]
    pub killed_footer: Vec<String>,
    #[serde(default = "default_hologram_countdown")]
    pub hologram_countdown: String,
}

fn default_killed_header() -> Vec<String> {
    vec![
        String::new(),
        "%displayname% has been slain!".to_string(),
        "Top damage:".to_string(),
    ]
}

fn default_top_format() -> String {
    " - %displayname%: %damage% dmg (%percentage%%) earned %earned%".to_string()
}

fn default_killed_other() -> String {
    " ... and +%amount% others".to_string()
}

fn default_killed_footer() -> Vec<String> {
    vec!["A reward of %money% was shared.".to_string(), String::new()]
}

fn default_hologram_countdown() -> String {
    "Appears in %time%".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            killed_header: default_killed_header(),
            top_format: default_top_format(),
            killed_other: default_killed_other(),
            killed_footer: default_killed_footer(),
            hologram_countdown: default_hologram_countdown(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the spawner, boss type and kill record files.
    /// Empty means the platform data directory.
    #[serde(default)]
    pub data_directory: String,
    #[serde(default = "default_boss_types_file")]
    pub boss_types_file: String,
    #[serde(default = "default_spawners_file")]
    pub spawners_file: String,
    #[serde(default = "default_kill_log_file")]
    pub kill_log_file: String,
    /// Heartbeat period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Fixed seed for reward rolls (unset = OS entropy)
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub messages: MessagesConfig,
}

fn default_true() -> bool {
    true
}

fn default_boss_types_file() -> String {
    "boss_types.toml".to_string()
}

fn default_spawners_file() -> String {
    "spawners.toml".to_string()
}

fn default_kill_log_file() -> String {
    "kills.jsonl".to_string()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: String::new(),
            boss_types_file: default_boss_types_file(),
            spawners_file: default_spawners_file(),
            kill_log_file: default_kill_log_file(),
            tick_interval_ms: default_tick_interval_ms(),
            rng_seed: None,
            messages: MessagesConfig::default(),
        }
    }
}
