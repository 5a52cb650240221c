//! In-memory entity simulation

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;

use crate::boss::StatProfile;
use crate::world::{Buff, BuffKind, EntityId, ItemStack, Location, Vec3, World};

/// Health given to entities that never had it set
const DEFAULT_MAX_HEALTH: f64 = 20.0;

/// Observable state of one simulated entity
#[derive(Debug, Clone, PartialEq)]
pub struct SimEntity {
    pub kind: String,
    pub location: Location,
    pub health: f64,
    pub max_health: f64,
    pub custom_name: Option<String>,
    pub stats: StatProfile,
    pub buffs: Vec<Buff>,
    pub main_hand: Option<ItemStack>,
    /// Every `set_main_hand` call in order, including clears
    pub hand_history: Vec<Option<ItemStack>>,
    pub velocity: Vec3,
    pub target: Option<EntityId>,
    pub exempt: bool,
    /// Killed entities stay queryable until destroyed
    pub dead: bool,
}

impl SimEntity {
    fn new(kind: &str, location: &Location) -> Self {
        Self {
            kind: kind.to_string(),
            location: location.clone(),
            health: DEFAULT_MAX_HEALTH,
            max_health: DEFAULT_MAX_HEALTH,
            custom_name: None,
            stats: StatProfile::default(),
            buffs: Vec::new(),
            main_hand: None,
            hand_history: Vec::new(),
            velocity: Vec3::default(),
            target: None,
            exempt: false,
            dead: false,
        }
    }
}

#[derive(Debug, Default)]
struct WorldState {
    next_id: u64,
    entities: HashMap<EntityId, SimEntity>,
    drops: Vec<(Location, ItemStack)>,
}

impl WorldState {
    fn living(&self, entity: EntityId) -> Option<&SimEntity> {
        self.entities.get(&entity).filter(|e| !e.dead)
    }

    fn living_mut(&mut self, entity: EntityId) -> Option<&mut SimEntity> {
        self.entities.get_mut(&entity).filter(|e| !e.dead)
    }
}

/// Shared handle to an in-memory world.
///
/// Clones point at the same state, so one clone can be boxed into the
/// core's services while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct SandboxWorld {
    state: Arc<Mutex<WorldState>>,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, WorldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a non-boss entity (a player or a dummy target)
    pub fn add_entity(&self, kind: &str, location: &Location) -> EntityId {
        let mut state = self.state();
        state.next_id += 1;
        let id = EntityId(state.next_id);
        state.entities.insert(id, SimEntity::new(kind, location));
        id
    }

    /// Snapshot of an entity, dead or alive
    pub fn entity(&self, entity: EntityId) -> Option<SimEntity> {
        self.state().entities.get(&entity).cloned()
    }

    /// Ids of every living entity, sorted
    pub fn living(&self) -> Vec<EntityId> {
        let state = self.state();
        let mut ids: Vec<EntityId> = state
            .entities
            .iter()
            .filter(|(_, e)| !e.dead)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Kill an entity in place. Returns false if it was already dead or unknown.
    pub fn kill(&self, entity: EntityId) -> bool {
        let mut state = self.state();
        match state.living_mut(entity) {
            Some(e) => {
                e.health = 0.0;
                e.dead = true;
                true
            }
            None => false,
        }
    }

    /// Apply damage. Returns true if this hit killed the entity.
    pub fn damage(&self, entity: EntityId, amount: f64) -> bool {
        let mut state = self.state();
        let Some(e) = state.living_mut(entity) else {
            return false;
        };
        e.health = (e.health - amount.max(0.0)).max(0.0);
        if e.health <= 0.0 {
            e.dead = true;
            return true;
        }
        false
    }

    pub fn set_exempt(&self, entity: EntityId, exempt: bool) {
        if let Some(e) = self.state().living_mut(entity) {
            e.exempt = exempt;
        }
    }

    /// Move an entity without going through the leash
    pub fn move_entity(&self, entity: EntityId, location: &Location) {
        if let Some(e) = self.state().living_mut(entity) {
            e.location = location.clone();
        }
    }

    /// Items dropped so far, in drop order
    pub fn drops(&self) -> Vec<(Location, ItemStack)> {
        self.state().drops.clone()
    }

    /// Count down every buff by `ticks`, removing expired ones
    pub fn advance_effects(&self, ticks: u32) {
        let mut state = self.state();
        for e in state.entities.values_mut() {
            for buff in &mut e.buffs {
                buff.duration_ticks = buff.duration_ticks.saturating_sub(ticks);
            }
            e.buffs.retain(|buff| buff.duration_ticks > 0);
        }
    }
}

impl World for SandboxWorld {
    fn spawn_living_entity(&mut self, kind: &str, location: &Location) -> EntityId {
        self.add_entity(kind, location)
    }

    fn destroy(&mut self, entity: EntityId) {
        self.state().entities.remove(&entity);
    }

    fn is_dead(&self, entity: EntityId) -> bool {
        self.state().living(entity).is_none()
    }

    fn location(&self, entity: EntityId) -> Option<Location> {
        self.state().entities.get(&entity).map(|e| e.location.clone())
    }

    fn teleport(&mut self, entity: EntityId, location: &Location) {
        self.move_entity(entity, location);
    }

    fn health(&self, entity: EntityId) -> f64 {
        self.state().living(entity).map_or(0.0, |e| e.health)
    }

    fn set_health(&mut self, entity: EntityId, health: f64) {
        if let Some(e) = self.state().living_mut(entity) {
            e.health = health.clamp(0.0, e.max_health);
        }
    }

    fn max_health(&self, entity: EntityId) -> f64 {
        self.state().living(entity).map_or(0.0, |e| e.max_health)
    }

    fn set_max_health(&mut self, entity: EntityId, max_health: f64) {
        if let Some(e) = self.state().living_mut(entity) {
            e.max_health = max_health.max(0.0);
            e.health = e.health.min(e.max_health);
        }
    }

    fn set_custom_name(&mut self, entity: EntityId, name: &str) {
        if let Some(e) = self.state().living_mut(entity) {
            e.custom_name = Some(name.to_string());
        }
    }

    fn apply_stats(&mut self, entity: EntityId, stats: &StatProfile) {
        if let Some(e) = self.state().living_mut(entity) {
            e.stats = stats.clone();
        }
    }

    fn buff_amplifier(&self, entity: EntityId, kind: BuffKind) -> Option<u8> {
        self.state()
            .living(entity)?
            .buffs
            .iter()
            .find(|buff| buff.kind == kind)
            .map(|buff| buff.amplifier)
    }

    fn apply_buff(&mut self, entity: EntityId, buff: Buff) {
        if let Some(e) = self.state().living_mut(entity) {
            e.buffs.retain(|b| b.kind != buff.kind);
            e.buffs.push(buff);
        }
    }

    fn set_main_hand(&mut self, entity: EntityId, item: Option<ItemStack>) {
        if let Some(e) = self.state().living_mut(entity) {
            e.hand_history.push(item.clone());
            e.main_hand = item;
        }
    }

    fn velocity(&self, entity: EntityId) -> Vec3 {
        self.state()
            .living(entity)
            .map_or_else(Vec3::default, |e| e.velocity)
    }

    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3) {
        if let Some(e) = self.state().living_mut(entity) {
            e.velocity = velocity;
        }
    }

    fn target(&self, entity: EntityId) -> Option<EntityId> {
        self.state().living(entity)?.target
    }

    fn set_target(&mut self, entity: EntityId, target: Option<EntityId>) {
        if let Some(e) = self.state().living_mut(entity) {
            e.target = target;
        }
    }

    fn is_exempt(&self, entity: EntityId) -> bool {
        self.state().living(entity).is_some_and(|e| e.exempt)
    }

    fn drop_item(&mut self, location: &Location, item: ItemStack) {
        self.state().drops.push((location.clone(), item));
    }
}
