//! Tests for boss lifecycle: tick, attack, despawn and death
//!
//! Each test spawns a boss into a spawner backed by the in-memory sandbox
//! and inspects the sandbox afterwards.

use std::sync::Arc;

use lair_types::MessagesConfig;

use crate::context::Services;
use crate::sandbox::Sandbox;
use crate::signals::BossSignal;
use crate::spawner::{BossRegistry, Spawner};
use crate::world::{Buff, BuffKind, EntityId, ItemStack, Location, World};

use super::{Boss, BossType, DeathReport, RewardItem};

const INTERVAL_MS: i64 = 60_000;

struct Fixture {
    sandbox: Sandbox,
    services: Services,
    registry: BossRegistry,
    spawner: Spawner,
}

impl Fixture {
    fn new(boss_type: BossType) -> Self {
        let sandbox = Sandbox::new();
        let services = sandbox.services().with_messages(messages()).with_seed(7);
        let spawner = Spawner::new(
            "arena",
            "Arena Ravager",
            anchor(),
            Arc::new(boss_type),
            200.0,
            8.0,
            INTERVAL_MS,
        );
        Self {
            sandbox,
            services,
            registry: BossRegistry::new(),
            spawner,
        }
    }

    /// Fill the slot and return the boss entity
    fn spawn(&mut self) -> EntityId {
        self.spawner.spawn(0, &mut self.registry, &mut self.services);
        self.boss().entity().expect("spawned")
    }

    fn boss(&mut self) -> &mut Boss {
        self.spawner.current_mut().expect("slot occupied")
    }

    fn kill(&mut self, now: i64) -> DeathReport {
        let boss = self.spawner.take_current().expect("slot occupied");
        boss.on_death(&mut self.spawner, &mut self.registry, &mut self.services, now)
    }

    fn tick(&mut self) {
        let anchor = self.spawner.location().clone();
        self.spawner
            .current_mut()
            .expect("slot occupied")
            .on_tick(&anchor, &mut self.services);
    }
}

fn anchor() -> Location {
    Location::new("overworld", 0.0, 64.0, 0.0)
}

fn messages() -> MessagesConfig {
    MessagesConfig {
        killed_header: vec!["== %displayname% slain (%money%) ==".to_string()],
        top_format: "%displayname% %earned% %percentage% %damage%".to_string(),
        killed_other: "+%amount% others".to_string(),
        killed_footer: vec!["== end ==".to_string()],
        hologram_countdown: "%displayname% in %time%".to_string(),
    }
}

fn rewarding_type(money: f64) -> BossType {
    let mut boss_type = BossType::new("ravager", "ravager");
    boss_type.money_reward = money;
    boss_type
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Rewards and Announcement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_payout_split_by_damage_share() {
    let mut f = Fixture::new(rewarding_type(100.0));
    f.spawn();
    f.boss().on_damage("Alex", 80.0);
    f.boss().on_damage("Sam", 20.0);

    let report = f.kill(1_000);

    let deposits = f.sandbox.ledger.deposits();
    assert_eq!(deposits.len(), 2);
    assert_eq!(deposits[0].0, "Alex");
    assert_close(deposits[0].1, 80.0);
    assert_eq!(deposits[1].0, "Sam");
    assert_close(deposits[1].1, 20.0);

    assert_eq!(
        report.announcement,
        vec![
            "== Arena Ravager slain (100.00) ==",
            "Alex 80.00 80.0 80",
            "Sam 20.00 20.0 20",
            "== end ==",
        ]
    );
    assert_eq!(f.sandbox.announcer.lines(), report.announcement);
}

#[test]
fn test_announcement_collapses_extra_attackers() {
    let mut f = Fixture::new(rewarding_type(210.0));
    f.spawn();
    for (name, damage) in [("A", 60.0), ("B", 50.0), ("C", 40.0), ("D", 30.0), ("E", 20.0), ("F", 10.0)] {
        f.boss().on_damage(name, damage);
    }

    let report = f.kill(1_000);

    // header + 4 ranked + others + footer
    assert_eq!(report.announcement.len(), 7);
    assert!(report.announcement[1].starts_with("A "));
    assert!(report.announcement[4].starts_with("D "));
    assert_eq!(report.announcement[5], "+2 others");
    // Everyone is still paid, not just the announced ranks
    assert_eq!(f.sandbox.ledger.deposits().len(), 6);
}

#[test]
fn test_zero_damage_pays_nothing() {
    let mut f = Fixture::new(rewarding_type(100.0));
    f.spawn();

    let report = f.kill(1_000);

    assert!(f.sandbox.ledger.deposits().is_empty());
    assert!(report.shares.is_empty());
    assert_eq!(
        report.announcement,
        vec!["== Arena Ravager slain (100.00) ==", "== end =="]
    );
    let records = f.sandbox.kills.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].top.is_empty());
}

#[test]
fn test_zero_reward_still_ranks_attackers() {
    let mut f = Fixture::new(rewarding_type(0.0));
    f.spawn();
    f.boss().on_damage("Alex", 30.0);

    let report = f.kill(1_000);

    assert!(f.sandbox.ledger.deposits().is_empty());
    assert_eq!(report.announcement[1], "Alex 0.00 100.0 30");
}

#[test]
fn test_silent_type_pays_without_announcing() {
    let mut boss_type = rewarding_type(50.0);
    boss_type.is_broadcastable = false;
    let mut f = Fixture::new(boss_type);
    f.spawn();
    f.boss().on_damage("Alex", 10.0);

    let report = f.kill(1_000);

    assert!(report.announcement.is_empty());
    assert!(f.sandbox.announcer.lines().is_empty());
    assert_close(f.sandbox.ledger.balance("Alex"), 50.0);
}

#[test]
fn test_ledger_failure_does_not_abort_death() {
    let mut f = Fixture::new(rewarding_type(100.0));
    f.spawn();
    f.boss().on_damage("Alex", 50.0);
    f.boss().on_damage("Sam", 50.0);
    f.sandbox.ledger.freeze("Alex");

    f.kill(1_000);

    assert_close(f.sandbox.ledger.balance("Alex"), 0.0);
    assert_close(f.sandbox.ledger.balance("Sam"), 50.0);
    assert_eq!(f.sandbox.kills.records().len(), 1);
    assert_eq!(f.spawner.respawn_at(), 1_000 + INTERVAL_MS);
}

#[test]
fn test_closed_kill_queue_does_not_abort_death() {
    let mut f = Fixture::new(rewarding_type(100.0));
    let entity = f.spawn();
    f.boss().on_damage("Alex", 5.0);
    f.sandbox.kills.close();

    let report = f.kill(1_000);

    assert!(f.sandbox.kills.records().is_empty());
    assert_eq!(report.leaderboard.len(), 1);
    assert!(!f.registry.is_alive(entity));
}

// ─────────────────────────────────────────────────────────────────────────────
// Kill Record and Loot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_kill_record_keeps_top_three() {
    let mut f = Fixture::new(rewarding_type(0.0));
    let entity = f.spawn();
    for (name, damage) in [("E", 5.0), ("A", 50.0), ("C", 30.0), ("B", 40.0), ("D", 20.0)] {
        f.boss().on_damage(name, damage);
    }

    f.kill(42_000);

    let records = f.sandbox.kills.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.boss_id, entity.to_string());
    assert_eq!(record.timestamp, 42_000);
    let top: Vec<(&str, i64)> = record
        .top
        .iter()
        .map(|e| (e.player.as_str(), e.damage))
        .collect();
    assert_eq!(top, vec![("A", 50), ("B", 40), ("C", 30)]);
}

#[test]
fn test_drops_roll_each_reward_at_death_location() {
    let mut boss_type = rewarding_type(0.0);
    boss_type.rewards = vec![
        RewardItem::new(ItemStack::new("diamond"), 1.0),
        RewardItem::new(ItemStack::new("dirt"), 0.0),
    ];
    let mut f = Fixture::new(boss_type);
    let entity = f.spawn();
    let death_spot = Location::new("overworld", 3.0, 64.0, 3.0);
    f.sandbox.world.move_entity(entity, &death_spot);
    f.sandbox.world.kill(entity);

    let report = f.kill(1_000);

    assert_eq!(report.drops, vec![ItemStack::new("diamond")]);
    assert_eq!(f.sandbox.world.drops(), vec![(death_spot, ItemStack::new("diamond"))]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_death_frees_slot_and_emits_signal() {
    let mut f = Fixture::new(rewarding_type(0.0));
    let entity = f.spawn();
    assert!(f.registry.is_alive(entity));

    f.kill(5_000);

    assert!(f.spawner.current().is_none());
    assert_eq!(f.spawner.respawn_at(), 5_000 + INTERVAL_MS);
    assert!(!f.registry.is_alive(entity));

    let signals = f.sandbox.signals.signals();
    assert!(matches!(signals.first(), Some(BossSignal::Spawned { .. })));
    assert!(matches!(
        signals.last(),
        Some(BossSignal::Died { boss_id, .. }) if *boss_id == entity
    ));
}

#[test]
fn test_child_death_leaves_spawner_slot_alone() {
    let mut f = Fixture::new(rewarding_type(0.0));
    f.spawn();

    let mut child_type = BossType::new("ravager_pup", "ravager");
    child_type.is_child = true;
    let mut minion = Boss::new("arena", Arc::new(child_type));
    let minion_id = minion.spawn(&anchor(), &mut f.registry, &mut f.services, 0);
    minion.on_damage("Alex", 4.0);

    minion.on_death(&mut f.spawner, &mut f.registry, &mut f.services, 9_000);

    assert!(f.spawner.current().is_some());
    assert_eq!(f.spawner.respawn_at(), 0);
    assert!(!f.registry.is_alive(minion_id));
}

#[test]
fn test_despawn_removes_entity_without_rewards() {
    let mut f = Fixture::new(rewarding_type(100.0));
    let entity = f.spawn();
    f.boss().on_damage("Alex", 10.0);

    f.spawner.despawn(2_000, &mut f.registry, &mut f.services);

    assert!(f.sandbox.world.entity(entity).is_none());
    assert!(f.sandbox.ledger.deposits().is_empty());
    assert!(f.sandbox.kills.records().is_empty());
    assert!(!f.registry.is_alive(entity));
    assert_eq!(f.spawner.respawn_at(), 2_000 + INTERVAL_MS);
    assert!(matches!(
        f.sandbox.signals.signals().last(),
        Some(BossSignal::Despawned { .. })
    ));
}

#[test]
fn test_despawn_after_entity_death_is_silent() {
    let mut f = Fixture::new(rewarding_type(0.0));
    let entity = f.spawn();
    f.sandbox.world.kill(entity);

    f.spawner.despawn(2_000, &mut f.registry, &mut f.services);

    assert_eq!(f.spawner.respawn_at(), 2_000 + INTERVAL_MS);
    assert!(!f.registry.is_alive(entity));
    assert!(
        !f.sandbox
            .signals
            .signals()
            .iter()
            .any(|s| matches!(s, BossSignal::Despawned { .. }))
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Tick and Attack
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_leash_boundary_is_inclusive() {
    let mut boss_type = rewarding_type(0.0);
    boss_type.inactive_radius = 10.0;
    let mut f = Fixture::new(boss_type);
    let entity = f.spawn();

    let inside = Location::new("overworld", 9.99, 64.0, 0.0);
    f.sandbox.world.move_entity(entity, &inside);
    f.tick();
    assert_eq!(f.sandbox.world.location(entity), Some(inside));

    f.sandbox
        .world
        .move_entity(entity, &Location::new("overworld", 10.0, 64.0, 0.0));
    f.tick();
    assert_eq!(f.sandbox.world.location(entity), Some(anchor()));
}

#[test]
fn test_other_world_counts_as_outside_radius() {
    let mut f = Fixture::new(rewarding_type(0.0));
    let entity = f.spawn();

    f.sandbox
        .world
        .move_entity(entity, &Location::new("nether", 0.0, 64.0, 0.0));
    f.tick();

    assert_eq!(f.sandbox.world.location(entity), Some(anchor()));
}

#[test]
fn test_regen_is_clamped_by_max_health() {
    let mut boss_type = rewarding_type(0.0);
    boss_type.regen_per_tick = 5.0;
    let mut f = Fixture::new(boss_type);
    let entity = f.spawn();
    let mut world = f.sandbox.world.clone();

    world.set_health(entity, 100.0);
    f.tick();
    assert_eq!(world.health(entity), 105.0);

    world.set_health(entity, 198.0);
    f.tick();
    assert_eq!(world.health(entity), 200.0);
}

#[test]
fn test_attack_uses_spawner_damage_and_strength() {
    let mut f = Fixture::new(rewarding_type(0.0));
    let entity = f.spawn();
    let world = f.sandbox.world.clone();

    let mut damage = 99.0;
    f.boss().on_attack(8.0, "Alex", &mut damage, &world);
    assert_eq!(damage, 8.0);

    let mut buffed = world.clone();
    buffed.apply_buff(
        entity,
        Buff {
            kind: BuffKind::Strength,
            duration_ticks: 200,
            amplifier: 0,
        },
    );
    f.boss().on_attack(8.0, "Alex", &mut damage, &world);
    assert_eq!(damage, 12.0);

    buffed.apply_buff(
        entity,
        Buff {
            kind: BuffKind::Strength,
            duration_ticks: 200,
            amplifier: 1,
        },
    );
    f.boss().on_attack(8.0, "Alex", &mut damage, &world);
    assert_eq!(damage, 20.0);
}

#[test]
fn test_spawn_applies_spawner_overrides() {
    let mut f = Fixture::new(rewarding_type(0.0));
    let entity = f.spawn();

    let state = f.sandbox.world.entity(entity).expect("alive");
    assert_eq!(state.custom_name.as_deref(), Some("Arena Ravager"));
    assert_eq!(state.max_health, 200.0);
    assert_eq!(state.health, 200.0);
    assert_eq!(f.boss().id(), Some(entity));
}
