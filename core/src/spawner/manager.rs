//! Spawner registry and heartbeat entry point
//!
//! The manager owns every registered spawner, the alive-boss registry, the
//! minion list and the collaborators. It is the single mutator of boss state:
//! heartbeats and combat events both go through `&mut self`.

use std::sync::Arc;

use hashbrown::HashMap;
use lair_types::SpawnerRecord;

use super::{BossRegistry, Spawner, SpawnerError};
use crate::boss::{Boss, BossTypeCatalog, DeathReport};
use crate::context::Services;
use crate::world::{EntityId, Location};

pub struct SpawnerManager {
    spawners: HashMap<String, Spawner>,
    registry: BossRegistry,
    /// Child bosses anchored to a spawner but not occupying its slot
    minions: Vec<Boss>,
    catalog: BossTypeCatalog,
    services: Services,
}

impl SpawnerManager {
    pub fn new(catalog: BossTypeCatalog, services: Services) -> Self {
        Self {
            spawners: HashMap::new(),
            registry: BossRegistry::new(),
            minions: Vec::new(),
            catalog,
            services,
        }
    }

    /// Build a manager with every persisted spawner registered.
    /// Fails on the first record that cannot be registered.
    pub fn from_records(
        records: &[SpawnerRecord],
        catalog: BossTypeCatalog,
        services: Services,
    ) -> Result<Self, SpawnerError> {
        let mut manager = Self::new(catalog, services);
        for record in records {
            manager.register_record(record)?;
        }
        tracing::info!(spawners = manager.spawners.len(), "Spawners loaded");
        Ok(manager)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn spawner(&self, id: &str) -> Option<&Spawner> {
        self.spawners.get(id)
    }

    pub fn spawner_mut(&mut self, id: &str) -> Option<&mut Spawner> {
        self.spawners.get_mut(id)
    }

    /// Spawners sorted by id
    pub fn spawners(&self) -> Vec<&Spawner> {
        let mut spawners: Vec<&Spawner> = self.spawners.values().collect();
        spawners.sort_by(|a, b| a.id().cmp(b.id()));
        spawners
    }

    pub fn alive_bosses(&self) -> &BossRegistry {
        &self.registry
    }

    pub fn minions(&self) -> &[Boss] {
        &self.minions
    }

    pub fn catalog(&self) -> &BossTypeCatalog {
        &self.catalog
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    // ─── Registration ───────────────────────────────────────────────────────

    pub fn register(&mut self, spawner: Spawner) -> Result<(), SpawnerError> {
        if self.spawners.contains_key(spawner.id()) {
            return Err(SpawnerError::DuplicateId {
                id: spawner.id().to_string(),
            });
        }
        if spawner.boss_type().is_child {
            return Err(SpawnerError::ChildTypeInSlot {
                id: spawner.boss_type().id.clone(),
            });
        }

        tracing::info!(spawner_id = %spawner.id(), boss_type = %spawner.boss_type().id, "Spawner registered");
        self.spawners.insert(spawner.id().to_string(), spawner);
        Ok(())
    }

    /// Rebuild and register a persisted spawner
    pub fn register_record(&mut self, record: &SpawnerRecord) -> Result<(), SpawnerError> {
        let spawner = Spawner::from_record(record, &self.catalog)?;
        self.register(spawner)
    }

    /// Despawn the boss, its minions and the label, then remove the spawner
    pub fn unregister(&mut self, id: &str, now: i64) -> Result<Spawner, SpawnerError> {
        let mut spawner = self
            .spawners
            .remove(id)
            .ok_or_else(|| SpawnerError::UnknownSpawner { id: id.to_string() })?;

        spawner.despawn(now, &mut self.registry, &mut self.services);

        let (owned, kept): (Vec<Boss>, Vec<Boss>) = std::mem::take(&mut self.minions)
            .into_iter()
            .partition(|minion| minion.spawner_id() == id);
        self.minions = kept;
        for minion in owned {
            minion.despawn(&mut spawner, &mut self.registry, &mut self.services, now);
        }

        tracing::info!(spawner_id = %id, "Spawner unregistered");
        Ok(spawner)
    }

    /// Persisted form of every spawner, sorted by id
    pub fn records(&self) -> Vec<SpawnerRecord> {
        self.spawners().into_iter().map(Spawner::to_record).collect()
    }

    // ─── Heartbeat ──────────────────────────────────────────────────────────

    /// Advance every spawner and minion by one tick
    pub fn tick(&mut self, now: i64) {
        for spawner in self.spawners.values_mut() {
            spawner.update(now, &mut self.registry, &mut self.services);
        }

        let registry = &mut self.registry;
        let world = self.services.world.as_ref();
        self.minions.retain(|minion| {
            let alive = minion.is_entity_alive(world);
            if !alive {
                if let Some(id) = minion.id() {
                    registry.unregister_alive(id);
                }
            }
            alive
        });

        for minion in &mut self.minions {
            if let Some(spawner) = self.spawners.get(minion.spawner_id()) {
                minion.on_tick(spawner.location(), &mut self.services);
            }
        }
    }

    /// Spawn a child boss of `type_id` against `spawner_id`'s anchor.
    /// Defaults to the anchor when no location is given.
    pub fn spawn_minion(
        &mut self,
        spawner_id: &str,
        type_id: &str,
        location: Option<Location>,
        now: i64,
    ) -> Result<EntityId, SpawnerError> {
        let spawner = self
            .spawners
            .get(spawner_id)
            .ok_or_else(|| SpawnerError::UnknownSpawner {
                id: spawner_id.to_string(),
            })?;
        let boss_type = self.catalog.require(type_id)?;
        if !boss_type.is_child {
            return Err(SpawnerError::NotChildType {
                id: type_id.to_string(),
            });
        }

        let location = location.unwrap_or_else(|| spawner.location().clone());
        let mut minion = self.registry.instantiate(spawner_id, Arc::clone(&boss_type));
        let entity = minion.spawn(&location, &mut self.registry, &mut self.services, now);
        self.minions.push(minion);
        Ok(entity)
    }

    // ─── Combat Events ──────────────────────────────────────────────────────

    /// Rewrite damage a boss deals. Returns false if `entity` is not a boss.
    pub fn handle_attack(&mut self, entity: EntityId, attacker: &str, damage: &mut f64) -> bool {
        let Some(spawner_id) = self.owner_of(entity) else {
            return false;
        };
        let Some(spawner) = self.spawners.get(&spawner_id) else {
            return false;
        };
        let world = self.services.world.as_ref();

        if let Some(boss) = spawner.current().filter(|b| b.entity() == Some(entity)) {
            boss.on_attack(spawner.damage(), attacker, damage, world);
            return true;
        }
        if let Some(minion) = self.minions.iter().find(|m| m.entity() == Some(entity)) {
            minion.on_attack(spawner.damage(), attacker, damage, world);
            return true;
        }
        false
    }

    /// Attribute damage dealt to a boss. Returns false if `entity` is not a boss.
    pub fn handle_damage(&mut self, entity: EntityId, attacker: &str, amount: f64) -> bool {
        let Some(boss) = self.boss_mut(entity) else {
            return false;
        };
        boss.on_damage(attacker, amount);
        true
    }

    /// Run the death routine for a boss entity.
    /// Returns `None` if the entity is not a registered boss.
    pub fn handle_death(&mut self, entity: EntityId, now: i64) -> Option<DeathReport> {
        let spawner_id = self.owner_of(entity)?;
        let spawner = self.spawners.get_mut(&spawner_id)?;

        let boss = if spawner.current().and_then(Boss::entity) == Some(entity) {
            spawner.take_current()?
        } else {
            let pos = self.minions.iter().position(|m| m.entity() == Some(entity))?;
            self.minions.swap_remove(pos)
        };

        Some(boss.on_death(spawner, &mut self.registry, &mut self.services, now))
    }

    /// Despawn everything and release every label
    pub fn shutdown(&mut self, now: i64) {
        for minion in std::mem::take(&mut self.minions) {
            if let Some(spawner) = self.spawners.get_mut(minion.spawner_id()) {
                minion.despawn(spawner, &mut self.registry, &mut self.services, now);
            }
        }
        for spawner in self.spawners.values_mut() {
            spawner.despawn(now, &mut self.registry, &mut self.services);
        }
        self.registry.clear();
        tracing::info!(spawners = self.spawners.len(), "Spawner manager shut down");
    }

    // ─── Internals ──────────────────────────────────────────────────────────

    fn owner_of(&self, entity: EntityId) -> Option<String> {
        self.registry.get(entity).map(|alive| alive.spawner_id.clone())
    }

    fn boss_mut(&mut self, entity: EntityId) -> Option<&mut Boss> {
        let spawner_id = self.owner_of(entity)?;
        let in_slot = self
            .spawners
            .get(&spawner_id)
            .and_then(Spawner::current)
            .is_some_and(|boss| boss.entity() == Some(entity));

        if in_slot {
            self.spawners.get_mut(&spawner_id)?.current_mut()
        } else {
            self.minions.iter_mut().find(|m| m.entity() == Some(entity))
        }
    }
}
