//! Damage attribution
//!
//! Every hit a boss receives from a player is recorded twice: the raw amount
//! goes into a running total, and the amount truncated to an integer goes into
//! that player's entry. Truncation is per hit, so the integer entries may sum
//! to less than the total. Shares are computed against the untruncated total.

use hashbrown::HashMap;

use crate::storage::LeaderboardEntry;

/// One attacker's cut of a kill
#[derive(Debug, Clone, PartialEq)]
pub struct DamageShare {
    pub attacker: String,
    pub damage: i64,
    /// Percentage of the boss's total damage, 0-100
    pub percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DamageTracker {
    damagers: HashMap<String, i64>,
    total: f64,
}

impl DamageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit. Negative and non-finite amounts are ignored so the
    /// total never decreases.
    pub fn record(&mut self, attacker: &str, amount: f64) {
        if !amount.is_finite() || amount < 0.0 {
            return;
        }

        self.total += amount;
        let truncated = amount.trunc() as i64;
        *self.damagers.entry(attacker.to_string()).or_insert(0) += truncated;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn damage_of(&self, attacker: &str) -> Option<i64> {
        self.damagers.get(attacker).copied()
    }

    pub fn damagers(&self) -> &HashMap<String, i64> {
        &self.damagers
    }

    pub fn attacker_count(&self) -> usize {
        self.damagers.len()
    }

    /// Attackers sorted by damage descending, ties broken by name
    pub fn ranked(&self) -> Vec<(String, i64)> {
        let mut ranked: Vec<(String, i64)> = self
            .damagers
            .iter()
            .map(|(name, damage)| (name.clone(), *damage))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    /// Percentage shares in rank order. Empty when the total is zero.
    pub fn shares(&self) -> Vec<DamageShare> {
        if self.total <= 0.0 {
            return Vec::new();
        }

        self.ranked()
            .into_iter()
            .map(|(attacker, damage)| DamageShare {
                percent: damage as f64 / self.total * 100.0,
                attacker,
                damage,
            })
            .collect()
    }

    /// Owned top-`limit` snapshot, safe to hand to another thread
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut top = self.ranked();
        top.truncate(limit);
        top.into_iter()
            .map(|(player, damage)| LeaderboardEntry { player, damage })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_each_hit_not_the_sum() {
        let mut tracker = DamageTracker::new();
        tracker.record("Alex", 2.7);
        tracker.record("Alex", 2.7);
        tracker.record("Sam", 0.9);

        assert!((tracker.total() - 6.3).abs() < 1e-9);
        // 2 + 2, not trunc(5.4) = 5
        assert_eq!(tracker.damage_of("Alex"), Some(4));
        // Sub-integer hits still create the entry
        assert_eq!(tracker.damage_of("Sam"), Some(0));
        assert_eq!(tracker.attacker_count(), 2);
    }

    #[test]
    fn ignores_negative_and_non_finite_hits() {
        let mut tracker = DamageTracker::new();
        tracker.record("Alex", 10.0);
        tracker.record("Alex", -4.0);
        tracker.record("Alex", f64::NAN);
        tracker.record("Alex", f64::INFINITY);

        assert_eq!(tracker.total(), 10.0);
        assert_eq!(tracker.damage_of("Alex"), Some(10));
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let mut tracker = DamageTracker::new();
        for (name, amount) in [("a", 13.0), ("b", 7.0), ("c", 29.0), ("d", 51.0), ("a", 3.0)] {
            tracker.record(name, amount);
        }

        let sum: f64 = tracker.shares().iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn shares_are_ranked_by_damage() {
        let mut tracker = DamageTracker::new();
        tracker.record("low", 5.0);
        tracker.record("high", 50.0);
        tracker.record("mid", 20.0);
        tracker.record("also_mid", 20.0);

        let order: Vec<String> = tracker.shares().into_iter().map(|s| s.attacker).collect();
        assert_eq!(order, vec!["high", "also_mid", "mid", "low"]);
    }

    #[test]
    fn zero_total_has_no_shares() {
        let mut tracker = DamageTracker::new();
        tracker.record("Alex", 0.0);

        assert_eq!(tracker.attacker_count(), 1);
        assert!(tracker.shares().is_empty());
    }

    #[test]
    fn leaderboard_is_capped() {
        let mut tracker = DamageTracker::new();
        for (i, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            tracker.record(name, (i as f64 + 1.0) * 10.0);
        }

        let top = tracker.leaderboard(3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].player, "e");
        assert_eq!(top[0].damage, 50);
        assert_eq!(top[2].player, "c");
    }
}
