//! Alive-boss registry
//!
//! Process-wide index of bosses bound to a live entity, keyed by entity id.
//! Combat events arrive with an entity id; the registry tells the manager
//! which spawner (slot or minion list) owns that boss.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::boss::{Boss, BossType};
use crate::world::EntityId;

/// Where an alive boss came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliveBoss {
    pub spawner_id: String,
    pub type_id: String,
}

#[derive(Debug, Default)]
pub struct BossRegistry {
    alive: HashMap<EntityId, AliveBoss>,
}

impl BossRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unspawned boss of `boss_type` for `spawner_id`
    pub fn instantiate(&self, spawner_id: &str, boss_type: Arc<BossType>) -> Boss {
        Boss::new(spawner_id, boss_type)
    }

    pub fn register_alive(&mut self, id: EntityId, spawner_id: &str, type_id: &str) {
        self.alive.insert(
            id,
            AliveBoss {
                spawner_id: spawner_id.to_string(),
                type_id: type_id.to_string(),
            },
        );
    }

    /// Returns false if the boss was not registered
    pub fn unregister_alive(&mut self, id: EntityId) -> bool {
        self.alive.remove(&id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&AliveBoss> {
        self.alive.get(&id)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.alive.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &AliveBoss)> {
        self.alive.iter()
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn clear(&mut self) {
        self.alive.clear();
    }
}
