//! Boss type definitions
//!
//! A `BossType` is the immutable per-species descriptor shared by every
//! instance of that species. Types are loaded from TOML and never mutated;
//! live bosses hold them through an `Arc`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ability::{Ability, Ravager};
use crate::serde_defaults::default_true;
use crate::world::ItemStack;

// ═══════════════════════════════════════════════════════════════════════════
// Root Config Structure
// ═══════════════════════════════════════════════════════════════════════════

/// Root structure for boss type files (TOML)
///
/// ```toml
/// [[boss_type]]
/// id = "ravager"
/// entity_kind = "ravager"
/// ability = "ravager"
/// regen_per_tick = 2.0
/// inactive_radius = 24.0
/// money_reward = 500.0
///
/// [boss_type.stats]
/// movement_speed = 0.35
///
/// [[boss_type.rewards]]
/// chance = 0.25
/// item = { material = "diamond", amount = 3 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossTypeFile {
    #[serde(default, rename = "boss_type")]
    pub boss_types: Vec<BossType>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Boss Type
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossType {
    /// Unique identifier referenced by spawner records
    pub id: String,

    /// Entity kind handed to the world simulation (e.g. "ravager", "zombie")
    pub entity_kind: String,

    #[serde(default)]
    pub stats: StatProfile,

    /// Health restored each tick (0 disables)
    #[serde(default)]
    pub regen_per_tick: f64,

    /// Leash distance from the spawner anchor
    #[serde(default = "default_inactive_radius")]
    pub inactive_radius: f64,

    /// Minions do not occupy or free a spawner slot
    #[serde(default)]
    pub is_child: bool,

    #[serde(default = "default_true")]
    pub is_broadcastable: bool,

    /// Currency pool split between attackers on death
    #[serde(default)]
    pub money_reward: f64,

    #[serde(default)]
    pub rewards: Vec<RewardItem>,

    #[serde(default)]
    pub ability: AbilityKind,
}

fn default_inactive_radius() -> f64 {
    32.0
}

impl BossType {
    /// Minimal type with defaults, used by tests and the built-in catalog
    pub fn new(id: impl Into<String>, entity_kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_kind: entity_kind.into(),
            stats: StatProfile::default(),
            regen_per_tick: 0.0,
            inactive_radius: default_inactive_radius(),
            is_child: false,
            is_broadcastable: true,
            money_reward: 0.0,
            rewards: Vec::new(),
            ability: AbilityKind::None,
        }
    }

    /// Filter the reward pool through each item's inclusion gate
    pub fn roll_rewards<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ItemStack> {
        self.rewards
            .iter()
            .filter(|reward| reward.roll(rng))
            .map(|reward| reward.item.clone())
            .collect()
    }
}

/// Base attribute overrides applied to the entity at spawn.
/// Unset fields keep the simulation's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatProfile {
    #[serde(default)]
    pub movement_speed: Option<f64>,
    #[serde(default)]
    pub armor: Option<f64>,
    #[serde(default)]
    pub follow_range: Option<f64>,
    #[serde(default)]
    pub knockback_resistance: Option<f64>,
}

/// A lootable item with an inclusion chance in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardItem {
    pub item: ItemStack,
    #[serde(default = "default_chance")]
    pub chance: f64,
}

fn default_chance() -> f64 {
    1.0
}

impl RewardItem {
    pub fn new(item: ItemStack, chance: f64) -> Self {
        Self { item, chance }
    }

    /// Inclusion gate. Chances at or above 1 always pass, at or below 0 never do.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        if self.chance >= 1.0 {
            return true;
        }
        if self.chance <= 0.0 || self.chance.is_nan() {
            return false;
        }
        rng.gen_bool(self.chance)
    }
}

/// Special behavior layered on top of the base tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    #[default]
    None,
    /// Heavy melee: swaps to an axe at half health, then lunges on a cooldown
    Ravager,
}

impl AbilityKind {
    pub fn build(self) -> Option<Box<dyn Ability>> {
        match self {
            AbilityKind::None => None,
            AbilityKind::Ravager => Some(Box::new(Ravager::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_boss_type_file() {
        let toml = r#"
[[boss_type]]
id = "ravager"
entity_kind = "ravager"
ability = "ravager"
regen_per_tick = 2.0
money_reward = 500.0

[boss_type.stats]
movement_speed = 0.35

[[boss_type.rewards]]
chance = 0.25
item = { material = "diamond", amount = 3 }

[[boss_type]]
id = "ravager_pup"
entity_kind = "wolf"
is_child = true
is_broadcastable = false
"#;

        let file: BossTypeFile = toml::from_str(toml).expect("Failed to parse TOML");
        assert_eq!(file.boss_types.len(), 2);

        let ravager = &file.boss_types[0];
        assert_eq!(ravager.ability, AbilityKind::Ravager);
        assert_eq!(ravager.stats.movement_speed, Some(0.35));
        assert_eq!(ravager.inactive_radius, 32.0);
        assert!(ravager.is_broadcastable);
        assert_eq!(ravager.rewards[0].item.amount, 3);

        let pup = &file.boss_types[1];
        assert!(pup.is_child);
        assert!(!pup.is_broadcastable);
        assert_eq!(pup.ability, AbilityKind::None);
    }

    #[test]
    fn test_reward_gate_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut boss_type = BossType::new("lich", "skeleton");
        boss_type.rewards = vec![
            RewardItem::new(ItemStack::new("bone"), 1.0),
            RewardItem::new(ItemStack::new("crown"), 0.0),
            RewardItem::new(ItemStack::new("dust"), 1.5),
        ];

        for _ in 0..20 {
            let drops = boss_type.roll_rewards(&mut rng);
            let materials: Vec<&str> = drops.iter().map(|i| i.material.as_str()).collect();
            assert_eq!(materials, vec!["bone", "dust"]);
        }
    }
}
