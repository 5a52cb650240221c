//! Tests for SpawnerManager registration and event routing

use lair_types::SpawnerRecord;

use crate::boss::{BossType, BossTypeCatalog};
use crate::context::ConfigError;
use crate::sandbox::Sandbox;
use crate::world::{EntityId, Location, World};

use super::{SpawnerError, SpawnerManager};

const INTERVAL_MS: i64 = 30_000;

fn make_catalog() -> BossTypeCatalog {
    let mut catalog = BossTypeCatalog::new();
    let mut ravager = BossType::new("ravager", "ravager");
    ravager.money_reward = 100.0;
    catalog.insert(ravager).expect("unique id");

    let mut pup = BossType::new("pup", "wolf");
    pup.is_child = true;
    catalog.insert(pup).expect("unique id");
    catalog
}

fn make_record(id: &str, boss_type: &str) -> SpawnerRecord {
    SpawnerRecord {
        id: id.to_string(),
        display_name: format!("{id} boss"),
        location: "overworld,0,64,0".to_string(),
        boss_type: boss_type.to_string(),
        health: 100.0,
        damage: 10.0,
        interval: INTERVAL_MS,
        show_hologram: true,
        respawn_at: 0,
    }
}

fn make_manager(sandbox: &Sandbox) -> SpawnerManager {
    let records = vec![make_record("gate", "ravager"), make_record("cave", "ravager")];
    SpawnerManager::from_records(&records, make_catalog(), sandbox.services()).expect("valid records")
}

fn slot_entity(manager: &SpawnerManager, id: &str) -> EntityId {
    manager
        .spawner(id)
        .and_then(|s| s.current())
        .and_then(|b| b.entity())
        .expect("slot occupied")
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_register_rejects_duplicate_id() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);

    let err = manager
        .register_record(&make_record("gate", "ravager"))
        .expect_err("duplicate");
    assert!(matches!(err, SpawnerError::DuplicateId { id } if id == "gate"));
}

#[test]
fn test_register_rejects_child_type_in_slot() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);

    let err = manager
        .register_record(&make_record("den", "pup"))
        .expect_err("child type");
    assert!(matches!(err, SpawnerError::ChildTypeInSlot { .. }));
    assert!(manager.spawner("den").is_none());
}

#[test]
fn test_register_rejects_unknown_type() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);

    let err = manager
        .register_record(&make_record("den", "dragon"))
        .expect_err("unknown type");
    assert!(matches!(err, SpawnerError::Config(ConfigError::UnknownBossType { .. })));
}

#[test]
fn test_records_are_sorted_and_round_trip() {
    let sandbox = Sandbox::new();
    let manager = make_manager(&sandbox);

    let records = manager.records();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["cave", "gate"]);
    assert_eq!(records[1], make_record("gate", "ravager"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Heartbeat and Routing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tick_spawns_every_due_spawner() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);

    manager.tick(1_000);

    assert_eq!(manager.alive_bosses().len(), 2);
    assert_eq!(sandbox.world.living().len(), 2);
}

#[test]
fn test_damage_and_death_are_routed_to_slot_boss() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);
    manager.tick(0);
    let entity = slot_entity(&manager, "gate");

    assert!(manager.handle_damage(entity, "Alex", 75.0));
    assert!(manager.handle_damage(entity, "Sam", 25.0));
    assert!(!manager.handle_damage(EntityId(9_999), "Alex", 5.0));

    sandbox.world.kill(entity);
    let report = manager.handle_death(entity, 10_000).expect("boss death");

    assert_eq!(report.spawner_id, "gate");
    assert_eq!(report.shares.len(), 2);
    assert!((sandbox.ledger.balance("Alex") - 75.0).abs() < 1e-6);
    let gate = manager.spawner("gate").expect("registered");
    assert!(gate.current().is_none());
    assert_eq!(gate.respawn_at(), 10_000 + INTERVAL_MS);

    // Death is terminal
    assert!(manager.handle_death(entity, 11_000).is_none());
    assert!(!manager.handle_damage(entity, "Alex", 5.0));
}

#[test]
fn test_attack_is_rewritten_for_bosses_only() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);
    manager.tick(0);
    let entity = slot_entity(&manager, "gate");

    let mut damage = 3.0;
    assert!(manager.handle_attack(entity, "Alex", &mut damage));
    assert_eq!(damage, 10.0);

    let mut damage = 3.0;
    assert!(!manager.handle_attack(EntityId(9_999), "Alex", &mut damage));
    assert_eq!(damage, 3.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Minions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_minion_death_keeps_spawner_slot() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);
    manager.tick(0);
    let boss = slot_entity(&manager, "gate");

    let minion = manager
        .spawn_minion("gate", "pup", None, 500)
        .expect("child type");
    assert_eq!(manager.minions().len(), 1);
    assert_eq!(sandbox.world.location(minion), Some(Location::new("overworld", 0.0, 64.0, 0.0)));

    assert!(manager.handle_damage(minion, "Alex", 4.0));
    let report = manager.handle_death(minion, 1_000).expect("minion death");

    assert_eq!(report.boss_id, minion);
    assert!(manager.minions().is_empty());
    assert_eq!(slot_entity(&manager, "gate"), boss);
    assert_eq!(manager.spawner("gate").map(|s| s.respawn_at()), Some(0));
}

#[test]
fn test_spawn_minion_validates_inputs() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);

    let err = manager
        .spawn_minion("gate", "ravager", None, 0)
        .expect_err("not a child type");
    assert!(matches!(err, SpawnerError::NotChildType { .. }));

    let err = manager
        .spawn_minion("nowhere", "pup", None, 0)
        .expect_err("unknown spawner");
    assert!(matches!(err, SpawnerError::UnknownSpawner { .. }));

    assert!(manager.minions().is_empty());
}

#[test]
fn test_vanished_minion_is_pruned_on_tick() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);
    let spot = Location::new("overworld", 5.0, 64.0, 5.0);
    let minion = manager
        .spawn_minion("cave", "pup", Some(spot.clone()), 0)
        .expect("child type");
    assert_eq!(sandbox.world.location(minion), Some(spot));

    let mut world = sandbox.world.clone();
    world.destroy(minion);
    manager.tick(1_000);

    assert!(manager.minions().is_empty());
    assert!(!manager.alive_bosses().is_alive(minion));
}

// ─────────────────────────────────────────────────────────────────────────────
// Teardown
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unregister_despawns_boss_minions_and_label() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);
    manager.tick(0);
    manager.spawn_minion("gate", "pup", None, 0).expect("child type");
    let cave = slot_entity(&manager, "cave");

    // Give gate a countdown label by killing its boss
    let gate = slot_entity(&manager, "gate");
    sandbox.world.kill(gate);
    manager.handle_death(gate, 1_000);
    manager.tick(2_000);
    assert_eq!(sandbox.holograms.live_count(), 1);

    let removed = manager.unregister("gate", 3_000).expect("registered");

    assert_eq!(removed.id(), "gate");
    assert!(manager.spawner("gate").is_none());
    assert!(manager.minions().is_empty());
    assert_eq!(sandbox.holograms.live_count(), 0);
    assert_eq!(sandbox.world.living(), vec![cave]);
    assert!(matches!(
        manager.unregister("gate", 4_000),
        Err(SpawnerError::UnknownSpawner { .. })
    ));
}

#[test]
fn test_shutdown_despawns_everything() {
    let sandbox = Sandbox::new();
    let mut manager = make_manager(&sandbox);
    manager.tick(0);
    manager.spawn_minion("cave", "pup", None, 0).expect("child type");

    manager.shutdown(1_000);

    assert!(sandbox.world.living().is_empty());
    assert!(manager.alive_bosses().is_empty());
    assert!(manager.minions().is_empty());
    assert_eq!(sandbox.holograms.live_count(), 0);
    assert!(sandbox.ledger.deposits().is_empty());
}
