//! Live boss instances
//!
//! A `Boss` is one encounter bound to a simulated entity:
//! - `spawn` binds it to a new entity and registers it as alive
//! - `on_tick` / `on_attack` / `on_damage` run while it lives
//! - `despawn` removes it without rewards
//! - `on_death` pays out, announces, persists and drops loot
//!
//! `despawn` and `on_death` consume the boss, so nothing can touch its state
//! after the terminal transition.

use std::sync::Arc;

use super::ability::Ability;
use super::reward::{self, DeathReport, LEADERBOARD_SIZE};
use super::{BossType, DamageTracker};
use crate::context::Services;
use crate::signals::BossSignal;
use crate::spawner::{BossRegistry, Spawner};
use crate::storage::KillRecord;
use crate::world::{BuffKind, EntityId, Location, World};

#[derive(Debug)]
pub struct Boss {
    /// Assigned at spawn; equal to the entity id
    id: Option<EntityId>,
    boss_type: Arc<BossType>,
    /// Owning spawner (back-reference by id)
    spawner_id: String,
    /// Non-owning handle, cleared on despawn
    entity: Option<EntityId>,
    damage: DamageTracker,
    ability: Option<Box<dyn Ability>>,
}

impl Boss {
    pub fn new(spawner_id: impl Into<String>, boss_type: Arc<BossType>) -> Self {
        let ability = boss_type.ability.build();
        Self {
            id: None,
            boss_type,
            spawner_id: spawner_id.into(),
            entity: None,
            damage: DamageTracker::new(),
            ability,
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    pub fn boss_type(&self) -> &Arc<BossType> {
        &self.boss_type
    }

    pub fn spawner_id(&self) -> &str {
        &self.spawner_id
    }

    pub fn damage(&self) -> &DamageTracker {
        &self.damage
    }

    pub fn ability(&self) -> Option<&dyn Ability> {
        self.ability.as_deref()
    }

    /// Whether the bound entity still exists in the simulation
    pub fn is_entity_alive(&self, world: &dyn World) -> bool {
        self.entity.is_some_and(|entity| !world.is_dead(entity))
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    /// Create the entity at `location`, apply the type's stats and register
    /// as alive.
    pub fn spawn(
        &mut self,
        location: &Location,
        registry: &mut BossRegistry,
        services: &mut Services,
        now: i64,
    ) -> EntityId {
        let entity = services
            .world
            .spawn_living_entity(&self.boss_type.entity_kind, location);
        self.id = Some(entity);
        self.entity = Some(entity);
        services.world.apply_stats(entity, &self.boss_type.stats);

        if let Some(ability) = self.ability.as_mut() {
            ability.on_spawn(entity, services.world.as_mut());
        }

        registry.register_alive(entity, &self.spawner_id, &self.boss_type.id);
        services.emit(BossSignal::Spawned {
            boss_id: entity,
            spawner_id: self.spawner_id.clone(),
            type_id: self.boss_type.id.clone(),
            location: location.clone(),
            timestamp: now,
        });
        entity
    }

    /// Forced removal. Destroys a live entity and restarts the spawner's
    /// respawn timer even when the entity is already gone; no rewards are paid.
    pub fn despawn(
        self,
        spawner: &mut Spawner,
        registry: &mut BossRegistry,
        services: &mut Services,
        now: i64,
    ) {
        let Some(entity) = self.entity else {
            return;
        };
        registry.unregister_alive(entity);
        if !self.boss_type.is_child {
            spawner.die(now);
        }

        if services.world.is_dead(entity) {
            return;
        }

        services.world.destroy(entity);
        services.emit(BossSignal::Despawned {
            boss_id: entity,
            spawner_id: self.spawner_id,
            timestamp: now,
        });
    }

    /// Leash back to `anchor`, regenerate, then run the ability
    pub fn on_tick(&mut self, anchor: &Location, services: &mut Services) {
        let Some(entity) = self.entity else {
            return;
        };
        let world = services.world.as_mut();

        if self.is_outside_radius(anchor, world) {
            tracing::debug!(boss_id = %entity, %anchor, "Leashing boss to anchor");
            world.teleport(entity, anchor);
        }

        let regen = self.boss_type.regen_per_tick;
        if regen != 0.0 {
            let health = world.health(entity);
            world.set_health(entity, health + regen);
        }

        if let Some(ability) = self.ability.as_mut() {
            ability.on_tick(entity, world);
        }
    }

    /// Rewrite the damage this boss is about to deal to `attacker`.
    ///
    /// Base damage comes from the spawner; a strength buff adds
    /// `0.5 + amplifier` to the multiplier.
    pub fn on_attack(&self, spawner_damage: f64, attacker: &str, damage: &mut f64, world: &dyn World) {
        let Some(entity) = self.entity else {
            return;
        };

        let mut multiplier = 1.0;
        if let Some(amplifier) = world.buff_amplifier(entity, BuffKind::Strength) {
            multiplier += f64::from(amplifier) + 0.5;
        }

        *damage = spawner_damage * multiplier;
        tracing::trace!(boss_id = %entity, attacker, damage = *damage, "Boss attack");
    }

    /// Attribute damage received from `attacker`
    pub fn on_damage(&mut self, attacker: &str, amount: f64) {
        self.damage.record(attacker, amount);
    }

    /// Pay out, announce, persist and drop loot. Consumes the boss.
    pub fn on_death(
        self,
        spawner: &mut Spawner,
        registry: &mut BossRegistry,
        services: &mut Services,
        now: i64,
    ) -> DeathReport {
        let boss_type = Arc::clone(&self.boss_type);
        let boss_id = self.id.unwrap_or(EntityId(0));

        if !boss_type.is_child {
            spawner.die(now);
        }

        // Rewards
        let shares = self.damage.shares();
        let payouts = reward::compute_payouts(&shares, boss_type.money_reward);
        for payout in &payouts {
            if let Err(e) = services.ledger.deposit(&payout.attacker, payout.amount) {
                tracing::warn!(%boss_id, player = %payout.attacker, error = %e, "Reward deposit failed");
            }
        }

        // Announcement
        let announcement = if boss_type.is_broadcastable {
            let lines = reward::build_announcement(
                &services.messages,
                services.announcer.as_ref(),
                spawner.display_name(),
                boss_type.money_reward,
                &shares,
                &payouts,
            );
            for line in &lines {
                services.announcer.broadcast(line);
            }
            lines
        } else {
            Vec::new()
        };

        // Kill record: snapshot first, then hand off
        let leaderboard = self.damage.leaderboard(LEADERBOARD_SIZE);
        let record = KillRecord {
            boss_id: boss_id.to_string(),
            timestamp: now,
            top: leaderboard.clone(),
        };
        if let Err(e) = services.kills.submit(record) {
            tracing::warn!(%boss_id, error = %e, "Kill record hand-off failed");
        }

        // Loot
        let location = self
            .entity
            .and_then(|entity| services.world.location(entity))
            .unwrap_or_else(|| spawner.location().clone());
        let drops = boss_type.roll_rewards(&mut services.rng);
        for item in &drops {
            services.world.drop_item(&location, item.clone());
        }

        tracing::info!(
            %boss_id,
            spawner_id = %self.spawner_id,
            attackers = shares.len(),
            drops = drops.len(),
            "Boss killed"
        );

        services.emit(BossSignal::Died {
            boss_id,
            spawner_id: self.spawner_id.clone(),
            type_id: boss_type.id.clone(),
            location,
            drops: drops.clone(),
            leaderboard: leaderboard.clone(),
            timestamp: now,
        });
        registry.unregister_alive(boss_id);

        DeathReport {
            boss_id,
            spawner_id: self.spawner_id,
            shares,
            payouts,
            announcement,
            leaderboard,
            drops,
        }
    }

    fn is_outside_radius(&self, anchor: &Location, world: &dyn World) -> bool {
        let Some(location) = self.entity.and_then(|entity| world.location(entity)) else {
            return false;
        };
        location
            .distance(anchor)
            .is_none_or(|distance| distance >= self.boss_type.inactive_radius)
    }
}
