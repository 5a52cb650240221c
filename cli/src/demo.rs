//! Built-in content used when the data directory has no files yet

use lair_types::SpawnerRecord;

/// Written to the boss type file on first run
pub const DEMO_BOSS_TYPES: &str = r#"[[boss_type]]
id = "ravager"
entity_kind = "ravager"
ability = "ravager"
regen_per_tick = 1.0
inactive_radius = 24.0
money_reward = 500.0

[boss_type.stats]
movement_speed = 0.35
knockback_resistance = 0.75

[[boss_type.rewards]]
chance = 1.0
item = { material = "emerald", amount = 8 }

[[boss_type.rewards]]
chance = 0.25
item = { material = "diamond", amount = 2 }

[[boss_type]]
id = "brute"
entity_kind = "zombie"
regen_per_tick = 0.5
money_reward = 120.0

[[boss_type.rewards]]
chance = 0.5
item = { material = "iron_ingot", amount = 4 }

[[boss_type]]
id = "ravager_pup"
entity_kind = "wolf"
is_child = true
is_broadcastable = false
inactive_radius = 12.0
money_reward = 10.0
"#;

/// Spawners registered on first run
pub fn demo_spawners() -> Vec<SpawnerRecord> {
    vec![
        SpawnerRecord {
            id: "north_gate".to_string(),
            display_name: "Gatekeeper".to_string(),
            location: "overworld,120.5,64,-33".to_string(),
            boss_type: "ravager".to_string(),
            health: 600.0,
            damage: 12.0,
            interval: 120_000,
            show_hologram: true,
            respawn_at: 0,
        },
        SpawnerRecord {
            id: "crypt".to_string(),
            display_name: "Crypt Brute".to_string(),
            location: "overworld,-40,52,210".to_string(),
            boss_type: "brute".to_string(),
            health: 250.0,
            damage: 6.0,
            interval: 45_000,
            show_hologram: true,
            respawn_at: 0,
        },
    ]
}
