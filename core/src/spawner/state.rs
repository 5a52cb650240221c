//! Spawner lifecycle state machine
//!
//! A spawner is always in exactly one of two states:
//! - **Alive**: the slot holds a boss whose entity still exists
//! - **Respawning**: the slot is empty and `respawn_at` is pending or due
//!
//! `update` is called once per heartbeat and advances the state by at most
//! one step.

use std::sync::Arc;

use lair_types::SpawnerRecord;

use super::{BossRegistry, format_remaining};
use crate::boss::{Boss, BossType, BossTypeCatalog};
use crate::context::{ConfigError, Services};
use crate::world::{HologramDisplay, HologramHandle, Location, World};

/// Height of the countdown label above the anchor
const HOLOGRAM_HEIGHT: f64 = 1.5;

#[derive(Debug)]
pub struct Spawner {
    // ─── Identity and configuration (persisted) ─────────────────────────────
    id: String,
    display_name: String,
    location: Location,
    boss_type: Arc<BossType>,
    /// Max health applied to each spawned entity
    health: f64,
    /// Base damage dealt by the boss per hit
    damage: f64,
    /// Respawn delay in milliseconds
    interval_ms: i64,

    // ─── Runtime state ──────────────────────────────────────────────────────
    current: Option<Boss>,
    /// Unix millis; only meaningful while `current` is empty
    respawn_at: i64,
    show_hologram: bool,
    hologram: Option<HologramHandle>,
}

impl Spawner {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        location: Location,
        boss_type: Arc<BossType>,
        health: f64,
        damage: f64,
        interval_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            location,
            boss_type,
            health,
            damage,
            interval_ms,
            current: None,
            respawn_at: 0,
            show_hologram: true,
            hologram: None,
        }
    }

    /// Rebuild a spawner from its persisted record
    pub fn from_record(record: &SpawnerRecord, catalog: &BossTypeCatalog) -> Result<Self, ConfigError> {
        let location = record
            .location
            .parse::<Location>()
            .map_err(|source| ConfigError::InvalidLocation {
                value: record.location.clone(),
                source,
            })?;
        let boss_type = catalog.require(&record.boss_type)?;

        let mut spawner = Self::new(
            record.id.clone(),
            record.display_name.clone(),
            location,
            boss_type,
            record.health,
            record.damage,
            record.interval,
        );
        spawner.respawn_at = record.respawn_at;
        spawner.show_hologram = record.show_hologram;
        Ok(spawner)
    }

    pub fn to_record(&self) -> SpawnerRecord {
        SpawnerRecord {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            location: self.location.to_string(),
            boss_type: self.boss_type.id.clone(),
            health: self.health,
            damage: self.damage,
            interval: self.interval_ms,
            show_hologram: self.show_hologram,
            respawn_at: self.respawn_at,
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn boss_type(&self) -> &Arc<BossType> {
        &self.boss_type
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn respawn_at(&self) -> i64 {
        self.respawn_at
    }

    pub fn current(&self) -> Option<&Boss> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Boss> {
        self.current.as_mut()
    }

    pub(crate) fn take_current(&mut self) -> Option<Boss> {
        self.current.take()
    }

    pub fn shows_hologram(&self) -> bool {
        self.show_hologram
    }

    pub fn set_show_hologram(&mut self, show: bool) {
        self.show_hologram = show;
    }

    pub fn hologram(&self) -> Option<HologramHandle> {
        self.hologram
    }

    /// Slot occupied and the entity not destroyed
    pub fn is_alive(&self, world: &dyn World) -> bool {
        self.current
            .as_ref()
            .is_some_and(|boss| boss.is_entity_alive(world))
    }

    /// Milliseconds until the next spawn (negative once due)
    pub fn remaining_until_respawn(&self, now: i64) -> i64 {
        self.respawn_at - now
    }

    // ─── State Machine ──────────────────────────────────────────────────────

    /// Advance one heartbeat
    pub fn update(&mut self, now: i64, registry: &mut BossRegistry, services: &mut Services) {
        self.reap_stale(now, registry, services.world.as_ref());

        if let Some(boss) = self.current.as_mut() {
            boss.on_tick(&self.location, services);
        } else if self.remaining_until_respawn(now) <= 0 {
            self.spawn(now, registry, services);
        } else if self.show_hologram {
            self.refresh_hologram(now, services);
        } else {
            self.clear_hologram(services.holograms.as_mut());
        }
    }

    /// Spawn a fresh boss at the anchor and apply the name and health overrides
    pub fn spawn(&mut self, now: i64, registry: &mut BossRegistry, services: &mut Services) {
        let mut boss = registry.instantiate(&self.id, Arc::clone(&self.boss_type));
        let entity = boss.spawn(&self.location, registry, services, now);

        let world = services.world.as_mut();
        world.set_custom_name(entity, &self.display_name);
        world.set_max_health(entity, self.health);
        world.set_health(entity, self.health);

        tracing::debug!(spawner_id = %self.id, boss_id = %entity, "Spawner slot filled");
        self.current = Some(boss);
    }

    /// Free the slot and start the respawn timer
    pub fn die(&mut self, now: i64) {
        self.respawn_at = now + self.interval_ms;
        self.current = None;
        tracing::debug!(spawner_id = %self.id, respawn_at = self.respawn_at, "Respawn timer started");
    }

    /// Forced removal of the boss (no rewards) and the countdown label
    pub fn despawn(&mut self, now: i64, registry: &mut BossRegistry, services: &mut Services) {
        if let Some(boss) = self.current.take() {
            boss.despawn(self, registry, services, now);
        }
        self.clear_hologram(services.holograms.as_mut());
    }

    pub fn clear_hologram(&mut self, holograms: &mut dyn HologramDisplay) {
        if let Some(handle) = self.hologram.take() {
            holograms.delete(handle);
        }
    }

    /// Admin summary lines
    pub fn describe(&self, now: i64, world: &dyn World) -> Vec<String> {
        let status = if self.is_alive(world) {
            "Alive".to_string()
        } else {
            format!("respawns in {}", format_remaining(self.remaining_until_respawn(now) / 1000))
        };

        vec![
            format!("ID: {}", self.id),
            format!("Type: {}", self.boss_type.id),
            format!("Damage: {}", self.damage),
            format!("Health: {}", self.health),
            format!("Status: {status}"),
        ]
    }

    // ─── Internals ──────────────────────────────────────────────────────────

    /// Drop a boss whose entity was destroyed outside the death path and
    /// start the respawn timer.
    fn reap_stale(&mut self, now: i64, registry: &mut BossRegistry, world: &dyn World) {
        let stale = self
            .current
            .as_ref()
            .is_some_and(|boss| !boss.is_entity_alive(world));
        if !stale {
            return;
        }

        if let Some(id) = self.current.as_ref().and_then(Boss::id) {
            registry.unregister_alive(id);
            tracing::debug!(spawner_id = %self.id, boss_id = %id, "Boss entity vanished, freeing slot");
        }
        self.die(now);
    }

    fn refresh_hologram(&mut self, now: i64, services: &mut Services) {
        let time = format_remaining(self.remaining_until_respawn(now) / 1000);
        let text = services.announcer.format(
            &services.messages.hologram_countdown,
            &[("%displayname%", self.display_name.as_str()), ("%time%", time.as_str())],
        );

        match self.hologram {
            Some(handle) => services.holograms.set_line(handle, 1, &text),
            None => {
                let anchor = self.location.offset(0.0, HOLOGRAM_HEIGHT, 0.0);
                let handle = services.holograms.create(&anchor);
                services.holograms.set_line(handle, 0, &self.display_name);
                services.holograms.set_line(handle, 1, &text);
                self.hologram = Some(handle);
            }
        }
    }
}
