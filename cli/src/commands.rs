use std::io::Write;

use lair_core::boss::{Boss, DeathReport};
use lair_core::spawner::SpawnerManager;
use lair_core::storage::JsonlKillStore;
use lair_core::world::{EntityId, World};

use crate::{CliContext, now_ms};

/// Resolve a spawner id (its live boss) or a hex entity id
fn resolve_target(manager: &SpawnerManager, target: &str) -> Result<EntityId, String> {
    if let Some(spawner) = manager.spawner(target) {
        return spawner
            .current()
            .and_then(Boss::entity)
            .ok_or_else(|| format!("spawner '{target}' has no live boss"));
    }
    u64::from_str_radix(target, 16)
        .map(EntityId)
        .map_err(|_| format!("unknown spawner or entity '{target}'"))
}

fn print_report(report: &DeathReport) {
    for line in &report.announcement {
        println!("{line}");
    }
    println!(
        "{} died ({} attackers, {} paid, {} drops)",
        report.boss_id,
        report.shares.len(),
        report.payouts.len(),
        report.drops.len()
    );
    for item in &report.drops {
        println!("  dropped {} x{}", item.material, item.amount);
    }
}

pub async fn status(ctx: &CliContext) -> Result<(), String> {
    let manager = ctx.manager.lock().await;
    let now = now_ms();

    for spawner in manager.spawners() {
        for line in spawner.describe(now, &ctx.sandbox.world) {
            println!("  {line}");
        }
        if let Some(entity) = spawner.current().and_then(Boss::entity)
            && let Some(state) = ctx.sandbox.world.entity(entity)
        {
            println!(
                "  Boss: {entity} {:.1}/{:.1} hp, {} attackers",
                state.health,
                state.max_health,
                spawner.current().map_or(0, |b| b.damage().attacker_count())
            );
        }
        println!();
    }

    println!(
        "Alive bosses: {}, minions: {}",
        manager.alive_bosses().len(),
        manager.minions().len()
    );
    Ok(())
}

pub async fn list_types(ctx: &CliContext) -> Result<(), String> {
    let manager = ctx.manager.lock().await;
    let catalog = manager.catalog();

    println!("{:<20} {:<12} {:<8} {:<10} Reward", "Type", "Entity", "Child", "Ability");
    println!("{}", "-".repeat(64));
    for id in catalog.ids() {
        let Some(boss_type) = catalog.get(id) else {
            continue;
        };
        println!(
            "{:<20} {:<12} {:<8} {:<10} {:.2}",
            boss_type.id,
            boss_type.entity_kind,
            boss_type.is_child,
            format!("{:?}", boss_type.ability),
            boss_type.money_reward
        );
    }
    println!("\nTotal: {} types", catalog.len());
    Ok(())
}

pub async fn damage(ctx: &CliContext, target: &str, player: &str, amount: f64) -> Result<(), String> {
    let mut manager = ctx.manager.lock().await;
    let entity = resolve_target(&manager, target)?;

    if !manager.handle_damage(entity, player, amount) {
        return Err(format!("{entity} is not a boss"));
    }

    if ctx.sandbox.world.damage(entity, amount) {
        if let Some(report) = manager.handle_death(entity, now_ms()) {
            print_report(&report);
        }
    } else {
        println!(
            "{player} hit {entity} for {amount:.1} ({:.1} hp left)",
            ctx.sandbox.world.health(entity)
        );
    }
    Ok(())
}

pub async fn attack(ctx: &CliContext, target: &str, player: &str) -> Result<(), String> {
    let mut manager = ctx.manager.lock().await;
    let entity = resolve_target(&manager, target)?;

    let mut damage = 0.0;
    if !manager.handle_attack(entity, player, &mut damage) {
        return Err(format!("{entity} is not a boss"));
    }
    println!("{entity} hits {player} for {damage:.1}");
    Ok(())
}

pub async fn kill(ctx: &CliContext, target: &str) -> Result<(), String> {
    let mut manager = ctx.manager.lock().await;
    let entity = resolve_target(&manager, target)?;
    if !manager.alive_bosses().is_alive(entity) {
        return Err(format!("{entity} is not a boss"));
    }

    ctx.sandbox.world.kill(entity);
    if let Some(report) = manager.handle_death(entity, now_ms()) {
        print_report(&report);
    }
    Ok(())
}

/// Remove an entity behind the core's back, as an outside cause would
pub async fn destroy(ctx: &CliContext, target: &str) -> Result<(), String> {
    let entity = {
        let manager = ctx.manager.lock().await;
        resolve_target(&manager, target)?
    };

    let mut world = ctx.sandbox.world.clone();
    if world.is_dead(entity) {
        return Err(format!("{entity} is already gone"));
    }
    world.destroy(entity);
    println!("Destroyed {entity}; its spawner notices on the next heartbeat");
    Ok(())
}

pub async fn spawn_minion(ctx: &CliContext, spawner_id: &str, type_id: &str) -> Result<(), String> {
    let mut manager = ctx.manager.lock().await;
    let entity = manager
        .spawn_minion(spawner_id, type_id, None, now_ms())
        .map_err(|e| e.to_string())?;
    println!("Spawned {type_id} minion {entity} at '{spawner_id}'");
    Ok(())
}

pub async fn set_hologram(ctx: &CliContext, spawner_id: &str, show: bool) -> Result<(), String> {
    let mut manager = ctx.manager.lock().await;
    let spawner = manager
        .spawner_mut(spawner_id)
        .ok_or_else(|| format!("no spawner with id '{spawner_id}'"))?;
    spawner.set_show_hologram(show);
    println!(
        "Countdown label for '{spawner_id}' {}",
        if show { "shown" } else { "hidden" }
    );
    Ok(())
}

pub async fn save(ctx: &CliContext) -> Result<(), String> {
    let count = ctx.save_spawners().await?;
    println!("Saved {count} spawners");
    Ok(())
}

pub async fn show_kills(ctx: &CliContext, limit: usize) -> Result<(), String> {
    let records = JsonlKillStore::load_all(ctx.kill_log_path()).map_err(|e| e.to_string())?;
    if records.is_empty() {
        println!("No kills recorded");
        return Ok(());
    }

    let skip = records.len().saturating_sub(limit);
    for record in &records[skip..] {
        let when = chrono::DateTime::from_timestamp_millis(record.timestamp)
            .map_or_else(|| record.timestamp.to_string(), |t| t.to_rfc3339());
        let top: Vec<String> = record
            .top
            .iter()
            .map(|entry| format!("{} ({})", entry.player, entry.damage))
            .collect();
        println!("{when}  {}  {}", record.boss_id, top.join(", "));
    }
    println!("\nTotal: {} kills", records.len());
    Ok(())
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
