//! Death-time reward computation
//!
//! Pure functions over a damage snapshot: payouts proportional to each
//! attacker's share, and the ranked kill announcement.

use lair_types::MessagesConfig;

use super::DamageShare;
use crate::storage::LeaderboardEntry;
use crate::world::{Announcer, EntityId, ItemStack};

/// Ranked lines shown in a kill announcement before collapsing into "+N others"
pub const ANNOUNCED_RANKS: usize = 4;

/// Entries kept in a persisted kill leaderboard
pub const LEADERBOARD_SIZE: usize = 3;

/// Currency owed to one attacker
#[derive(Debug, Clone, PartialEq)]
pub struct Payout {
    pub attacker: String,
    pub amount: f64,
}

/// Everything a boss death produced, returned to the caller for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct DeathReport {
    pub boss_id: EntityId,
    pub spawner_id: String,
    pub shares: Vec<DamageShare>,
    pub payouts: Vec<Payout>,
    /// Lines that were broadcast (empty for non-broadcastable types)
    pub announcement: Vec<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub drops: Vec<ItemStack>,
}

/// Split `money_reward` by share. Nothing is owed when the pool is zero.
pub fn compute_payouts(shares: &[DamageShare], money_reward: f64) -> Vec<Payout> {
    if money_reward == 0.0 {
        return Vec::new();
    }

    shares
        .iter()
        .map(|share| Payout {
            attacker: share.attacker.clone(),
            amount: share.percent / 100.0 * money_reward,
        })
        .collect()
}

/// Build the kill announcement.
///
/// Header, up to `ANNOUNCED_RANKS` ranked lines, a "+N others" line when more
/// attackers contributed, then the footer. `shares` must already be ranked.
/// Header and footer get the spawner name and the total reward substituted.
pub fn build_announcement(
    messages: &MessagesConfig,
    announcer: &dyn Announcer,
    spawner_name: &str,
    money_reward: f64,
    shares: &[DamageShare],
    payouts: &[Payout],
) -> Vec<String> {
    let money = format_money(money_reward);
    let frame = |template: &String| {
        announcer.format(
            template,
            &[("%money%", money.as_str()), ("%displayname%", spawner_name)],
        )
    };

    let mut lines: Vec<String> = messages.killed_header.iter().map(frame).collect();

    for share in shares.iter().take(ANNOUNCED_RANKS) {
        let earned = payouts
            .iter()
            .find(|p| p.attacker == share.attacker)
            .map_or(0.0, |p| p.amount);
        let name = announcer.display_name(&share.attacker);
        let earned = format_money(earned);
        let percentage = format!("{:.1}", share.percent);
        let damage = share.damage.to_string();

        lines.push(announcer.format(
            &messages.top_format,
            &[
                ("%displayname%", name.as_str()),
                ("%earned%", earned.as_str()),
                ("%percentage%", percentage.as_str()),
                ("%damage%", damage.as_str()),
            ],
        ));
    }

    if shares.len() > ANNOUNCED_RANKS {
        let others = (shares.len() - ANNOUNCED_RANKS).to_string();
        lines.push(announcer.format(&messages.killed_other, &[("%amount%", others.as_str())]));
    }

    lines.extend(messages.killed_footer.iter().map(frame));
    lines
}

fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}
