//! Collaborator boundary
//!
//! The core never simulates entities, renders labels, moves money or formats
//! chat itself. Everything it needs from the host is expressed here as a
//! small trait:
//!
//! - **World**: living entities, their health, buffs, equipment and motion
//! - **HologramDisplay**: floating text labels used for respawn countdowns
//! - **Ledger**: currency deposits for reward payouts
//! - **Announcer**: template substitution and server-wide broadcast
//!
//! Entity handles are non-owning. The host may destroy an entity at any time,
//! so callers re-check `World::is_dead` instead of assuming a handle outlives
//! the boss that holds it.

mod error;
mod location;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::boss::StatProfile;

pub use error::{LedgerError, LocationParseError};
pub use location::Location;

// ─────────────────────────────────────────────────────────────────────────────
// Handles and Values
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a simulated entity. A boss takes the id of its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Handle to a floating text label owned by a spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HologramHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    /// Amplifies outgoing melee damage
    Strength,
    Speed,
    Resistance,
}

/// A timed status effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    pub duration_ticks: u32,
    /// Zero-based level (amplifier 0 = level I)
    pub amplifier: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    pub name: String,
    pub level: u8,
}

/// An item that can be equipped or dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default)]
    pub enchantments: Vec<Enchantment>,
}

fn default_amount() -> u32 {
    1
}

impl ItemStack {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            display_name: None,
            amount: 1,
            enchantments: Vec::new(),
        }
    }

    pub fn with_enchantment(mut self, name: impl Into<String>, level: u8) -> Self {
        self.enchantments.push(Enchantment {
            name: name.into(),
            level,
        });
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Entity simulation owned by the host.
///
/// Queries on an unknown or destroyed entity return neutral values
/// (`None`, `0.0`, `true` for `is_dead`); mutations on them are ignored.
pub trait World: Send {
    fn spawn_living_entity(&mut self, kind: &str, location: &Location) -> EntityId;
    fn destroy(&mut self, entity: EntityId);
    fn is_dead(&self, entity: EntityId) -> bool;

    fn location(&self, entity: EntityId) -> Option<Location>;
    fn teleport(&mut self, entity: EntityId, location: &Location);

    fn health(&self, entity: EntityId) -> f64;
    /// Sets health, clamped by the simulation to `[0, max_health]`
    fn set_health(&mut self, entity: EntityId, health: f64);
    fn max_health(&self, entity: EntityId) -> f64;
    fn set_max_health(&mut self, entity: EntityId, max_health: f64);
    fn set_custom_name(&mut self, entity: EntityId, name: &str);
    fn apply_stats(&mut self, entity: EntityId, stats: &StatProfile);

    /// Amplifier of the active buff of this kind, if any
    fn buff_amplifier(&self, entity: EntityId, kind: BuffKind) -> Option<u8>;
    fn apply_buff(&mut self, entity: EntityId, buff: Buff);

    fn set_main_hand(&mut self, entity: EntityId, item: Option<ItemStack>);

    fn velocity(&self, entity: EntityId) -> Vec3;
    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3);

    /// Current combat target of a mob
    fn target(&self, entity: EntityId) -> Option<EntityId>;
    fn set_target(&mut self, entity: EntityId, target: Option<EntityId>);
    /// Whether the entity is immune to abilities (e.g. creative or invulnerable players)
    fn is_exempt(&self, entity: EntityId) -> bool;

    fn drop_item(&mut self, location: &Location, item: ItemStack);
}

/// Floating text labels
pub trait HologramDisplay: Send {
    fn create(&mut self, location: &Location) -> HologramHandle;
    /// Write a line in place, appending empty lines up to `index` if needed
    fn set_line(&mut self, handle: HologramHandle, index: usize, text: &str);
    fn delete(&mut self, handle: HologramHandle);
}

/// Currency ledger. Deposits are fire-and-forget from the core's point of view.
pub trait Ledger: Send {
    fn deposit(&mut self, player: &str, amount: f64) -> Result<(), LedgerError>;
}

/// Localized text formatting and delivery
pub trait Announcer: Send {
    /// Replace every placeholder token in `template` with its value
    fn format(&self, template: &str, substitutions: &[(&str, &str)]) -> String {
        substitute(template, substitutions)
    }

    /// Display name for a player key (defaults to the key itself)
    fn display_name(&self, player: &str) -> String {
        player.to_string()
    }

    fn broadcast(&mut self, text: &str);
}

/// Plain placeholder replacement used by the default `Announcer::format`
pub fn substitute(template: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(template.to_string(), |text, (token, value)| {
            text.replace(token, value)
        })
}
