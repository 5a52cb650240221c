use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::CliContext;

/// Simulation ticks per second, used to age buff durations
const GAME_TICKS_PER_SEC: u64 = 20;

/// Start the periodic heartbeat that drives every spawner
pub async fn start(ctx: &CliContext) -> JoinHandle<()> {
    let period_ms = ctx.config.read().await.tick_interval_ms.max(1);
    let game_ticks = game_ticks_per_period(period_ms);

    let manager = Arc::clone(&ctx.manager);
    let world = ctx.sandbox.world.clone();

    tracing::info!(period_ms, "Heartbeat started");
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(period_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            world.advance_effects(game_ticks);
            manager.lock().await.tick(crate::now_ms());
        }
    })
}

/// Game ticks elapsed per heartbeat of `period_ms`, saturating at `u32::MAX`
fn game_ticks_per_period(period_ms: u64) -> u32 {
    u32::try_from(period_ms.saturating_mul(GAME_TICKS_PER_SEC) / 1000).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_ticks_per_period() {
        assert_eq!(game_ticks_per_period(50), 1);
        assert_eq!(game_ticks_per_period(1_000), 20);
        assert_eq!(game_ticks_per_period(1), 0);
    }

    #[test]
    fn test_game_ticks_saturate_on_huge_period() {
        assert_eq!(game_ticks_per_period(u64::MAX), u32::MAX);
    }
}
