//! Ability variants
//!
//! An ability is layered on top of the base boss behavior. `Boss` always runs
//! its own spawn/tick logic (leash, regen) before calling into the ability, so
//! a variant can add behavior but never skip the base contract.

use std::fmt;

use crate::world::{Buff, BuffKind, EntityId, ItemStack, Location, Vec3, World};

/// Extra per-variant behavior
pub trait Ability: Send + fmt::Debug {
    /// Called after the entity has been spawned and its stats applied
    fn on_spawn(&mut self, _entity: EntityId, _world: &mut dyn World) {}

    /// Called after the base leash and regen step
    fn on_tick(&mut self, _entity: EntityId, _world: &mut dyn World) {}
}

// ═══════════════════════════════════════════════════════════════════════════
// Ravager
// ═══════════════════════════════════════════════════════════════════════════

/// Ticks between lunges
pub const RAVAGER_COOLDOWN_TICKS: i32 = 60;

/// Duration of the strength buff applied on each lunge
pub const RAVAGER_STRENGTH_TICKS: u32 = 200;

fn ravager_crossbow() -> ItemStack {
    ItemStack::new("crossbow")
        .with_enchantment("impaling", 5)
        .with_enchantment("multishot", 1)
}

fn ravager_axe() -> ItemStack {
    ItemStack::new("iron_axe").with_enchantment("sharpness", 1)
}

/// Heavy melee variant.
///
/// Spawns with a crossbow. The first tick at or below half health swaps it
/// for an axe. Every later tick below half health counts the cooldown down;
/// when it runs out the ravager buffs itself and lunges at its target.
#[derive(Debug, Default)]
pub struct Ravager {
    ability_cooldown: i32,
    axed: bool,
}

impl Ravager {
    pub fn cooldown(&self) -> i32 {
        self.ability_cooldown
    }

    pub fn is_axed(&self) -> bool {
        self.axed
    }

    fn lunge(&self, entity: EntityId, world: &mut dyn World) {
        let Some(target) = world.target(entity) else {
            return;
        };
        if world.is_dead(target) || world.is_exempt(target) {
            return;
        }
        let (Some(from), Some(to)) = (world.location(entity), world.location(target)) else {
            return;
        };
        let Some(distance) = from.distance(&to) else {
            return;
        };
        if distance <= f64::EPSILON {
            return;
        }

        world.set_velocity(entity, lunge_velocity(position(&from), position(&to), distance));
        world.set_target(entity, Some(target));
    }
}

impl Ability for Ravager {
    fn on_spawn(&mut self, entity: EntityId, world: &mut dyn World) {
        world.set_main_hand(entity, Some(ravager_crossbow()));
    }

    fn on_tick(&mut self, entity: EntityId, world: &mut dyn World) {
        if world.health(entity) > world.max_health(entity) / 2.0 {
            return;
        }

        if !self.axed {
            self.axed = true;
            // Clear first so the client refreshes the held item
            world.set_main_hand(entity, None);
            world.set_main_hand(entity, Some(ravager_axe()));
            return;
        }

        self.ability_cooldown -= 1;
        if self.ability_cooldown > 0 {
            return;
        }

        self.ability_cooldown = RAVAGER_COOLDOWN_TICKS;
        world.apply_buff(
            entity,
            Buff {
                kind: BuffKind::Strength,
                duration_ticks: RAVAGER_STRENGTH_TICKS,
                amplifier: 0,
            },
        );
        self.lunge(entity, world);
    }
}

fn position(location: &Location) -> Vec3 {
    Vec3::new(location.x, location.y, location.z)
}

/// Velocity that carries the ravager toward `to`.
///
/// Horizontal speed grows with distance; the vertical term adds an arc that
/// also grows with distance.
pub fn lunge_velocity(from: Vec3, to: Vec3, distance: f64) -> Vec3 {
    let horizontal = 1.0 + 0.1 * distance;
    let vertical = 1.0 + 0.03 * distance;

    Vec3 {
        x: horizontal * (to.x - from.x) / distance,
        y: vertical * (to.y - from.y) / distance - 0.5 * -0.08 * distance,
        z: horizontal * (to.z - from.z) / distance,
    }
}
