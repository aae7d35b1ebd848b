//! Point accumulation and level derivation.
//!
//! [`UserStats`] is the caller-owned value object that the persistence layer
//! loads and stores. All mutation goes through [`PointsLedger`], which keeps
//! `level` a pure function of `points`:
//!
//! ```text
//! level = min(points / 100 + 1, 50)
//! ```
//!
//! Points keep accumulating past the level cap; only the level stops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::badges::{ActivitySnapshot, Badge, BadgeCatalog, BadgeDefinition};
use super::rewards::{RewardAction, RewardTable};
use crate::error::GamificationError;

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u64 = 100;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 50;

/// Level for a point total.
pub fn level_for(points: u64) -> u32 {
    let raw = points / POINTS_PER_LEVEL + 1;
    raw.min(u64::from(MAX_LEVEL)) as u32
}

/// A single recorded award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEvent {
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
    /// The action that triggered the award, if it came from the reward table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RewardAction>,
}

/// Per-user gamification state.
///
/// `level` is serialized for readers of the stored document but ignored on
/// load: it is always recomputed from `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredUserStats")]
pub struct UserStats {
    points: u64,
    level: u32,
    badges: Vec<Badge>,
    streaks: BTreeMap<String, u32>,
}

#[derive(Deserialize)]
struct StoredUserStats {
    #[serde(default)]
    points: u64,
    #[serde(default)]
    badges: Vec<Badge>,
    #[serde(default)]
    streaks: BTreeMap<String, u32>,
}

impl From<StoredUserStats> for UserStats {
    fn from(stored: StoredUserStats) -> Self {
        Self {
            points: stored.points,
            level: level_for(stored.points),
            badges: stored.badges,
            streaks: stored.streaks,
        }
    }
}

impl Default for UserStats {
    fn default() -> Self {
        let streaks = ["attendance", "mood", "health"]
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();
        Self {
            points: 0,
            level: 1,
            badges: Vec::new(),
            streaks,
        }
    }
}

impl UserStats {
    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Awarded badges in award order.
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn streaks(&self) -> &BTreeMap<String, u32> {
        &self.streaks
    }

    pub fn streak(&self, name: &str) -> u32 {
        self.streaks.get(name).copied().unwrap_or(0)
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }
}

/// Result of a point award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsUpdate {
    pub points: u64,
    pub level: u32,
}

/// Progress within the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// `points mod 100`, which is also the percentage of the current level
    pub percent: u8,
    /// `level * 100`. Stays at 5000 once the cap is reached.
    pub next_level_threshold: u64,
}

/// Mutation surface over one user's [`UserStats`].
#[derive(Debug, Clone, Default)]
pub struct PointsLedger {
    stats: UserStats,
    events: Vec<PointEvent>,
}

impl PointsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from stats supplied by the persistence layer.
    pub fn from_stats(stats: UserStats) -> Self {
        Self {
            stats,
            events: Vec::new(),
        }
    }

    /// Resume from stats plus previously recorded events.
    pub fn with_events(stats: UserStats, events: Vec<PointEvent>) -> Self {
        Self { stats, events }
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn events(&self) -> &[PointEvent] {
        &self.events
    }

    pub fn into_parts(self) -> (UserStats, Vec<PointEvent>) {
        (self.stats, self.events)
    }

    pub fn into_stats(self) -> UserStats {
        self.stats
    }

    /// Add `amount` points and recompute the level.
    ///
    /// # Errors
    /// Returns [`GamificationError::InvalidAmount`] if `amount <= 0`.
    pub fn add_points(&mut self, amount: i64) -> Result<PointsUpdate, GamificationError> {
        self.record(amount, None, Utc::now())
    }

    /// Add `amount` points with an explicit event timestamp.
    pub fn add_points_at(
        &mut self,
        amount: i64,
        at: DateTime<Utc>,
    ) -> Result<PointsUpdate, GamificationError> {
        self.record(amount, None, at)
    }

    /// Award the configured points for `action`.
    pub fn award(
        &mut self,
        action: RewardAction,
        table: &RewardTable,
    ) -> Result<PointsUpdate, GamificationError> {
        self.record(i64::from(table.points_for(action)), Some(action), Utc::now())
    }

    fn record(
        &mut self,
        amount: i64,
        action: Option<RewardAction>,
        at: DateTime<Utc>,
    ) -> Result<PointsUpdate, GamificationError> {
        if amount <= 0 {
            return Err(GamificationError::InvalidAmount { amount });
        }
        let amount = amount as u64;
        let previous_level = self.stats.level;

        self.stats.points = self.stats.points.saturating_add(amount);
        self.stats.level = level_for(self.stats.points);
        self.events.push(PointEvent {
            amount,
            timestamp: at,
            action,
        });

        if self.stats.level > previous_level {
            tracing::debug!(
                from = previous_level,
                to = self.stats.level,
                points = self.stats.points,
                "level up"
            );
        }

        Ok(PointsUpdate {
            points: self.stats.points,
            level: self.stats.level,
        })
    }

    pub fn progress_to_next_level(&self) -> LevelProgress {
        LevelProgress {
            level: self.stats.level,
            percent: (self.stats.points % POINTS_PER_LEVEL) as u8,
            next_level_threshold: u64::from(self.stats.level) * POINTS_PER_LEVEL,
        }
    }

    /// Award a badge now.
    ///
    /// # Errors
    /// Returns [`GamificationError::DuplicateBadge`] if the id is already held.
    pub fn add_badge(&mut self, badge: &BadgeDefinition) -> Result<Badge, GamificationError> {
        self.add_badge_at(badge, Utc::now())
    }

    pub fn add_badge_at(
        &mut self,
        badge: &BadgeDefinition,
        at: DateTime<Utc>,
    ) -> Result<Badge, GamificationError> {
        if self.stats.has_badge(&badge.id) {
            return Err(GamificationError::DuplicateBadge {
                id: badge.id.clone(),
            });
        }
        let awarded = badge.award(at);
        tracing::info!(badge = %awarded.id, "badge awarded");
        self.stats.badges.push(awarded.clone());
        Ok(awarded)
    }

    /// Award every eligible badge from `catalog` not already held.
    ///
    /// Unlike [`add_badge`](Self::add_badge), already-held badges are skipped
    /// rather than reported, since re-evaluation after every action is the
    /// normal call pattern.
    pub fn award_eligible(
        &mut self,
        catalog: &BadgeCatalog,
        activity: &ActivitySnapshot,
    ) -> Vec<Badge> {
        let now = Utc::now();
        let mut awarded = Vec::new();
        for def in catalog.eligible(activity) {
            if let Ok(badge) = self.add_badge_at(def, now) {
                awarded.push(badge);
            }
        }
        awarded
    }

    /// Store the latest value of a named streak counter.
    pub fn record_streak(&mut self, name: &str, value: u32) {
        self.stats.streaks.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::badges::BadgeCondition;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn week_warrior() -> BadgeDefinition {
        BadgeDefinition::new(
            "week-warrior",
            "Week Warrior",
            "Log daily for 7 days",
            "💪",
            BadgeCondition::Streak7,
        )
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(4899), 49);
        assert_eq!(level_for(4900), 50);
        assert_eq!(level_for(1_000_000), 50);
    }

    #[test]
    fn add_points_rejects_non_positive() {
        let mut ledger = PointsLedger::new();
        assert_eq!(
            ledger.add_points(0),
            Err(GamificationError::InvalidAmount { amount: 0 })
        );
        assert_eq!(
            ledger.add_points(-10),
            Err(GamificationError::InvalidAmount { amount: -10 })
        );
        assert_eq!(ledger.stats().points(), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn add_points_updates_level() {
        let mut ledger = PointsLedger::new();
        let update = ledger.add_points(250).unwrap();
        assert_eq!(update, PointsUpdate { points: 250, level: 3 });
        assert_eq!(ledger.events().len(), 1);
        assert_eq!(ledger.events()[0].amount, 250);
    }

    #[test]
    fn points_continue_past_level_cap() {
        let mut ledger = PointsLedger::new();
        ledger.add_points(5000).unwrap();
        let update = ledger.add_points(1234).unwrap();
        assert_eq!(update.points, 6234);
        assert_eq!(update.level, MAX_LEVEL);
    }

    #[test]
    fn progress_reports_points_within_level() {
        let mut ledger = PointsLedger::new();
        ledger.add_points(340).unwrap();
        assert_eq!(
            ledger.progress_to_next_level(),
            LevelProgress {
                level: 4,
                percent: 40,
                next_level_threshold: 400
            }
        );
    }

    #[test]
    fn progress_at_cap_keeps_threshold() {
        let mut ledger = PointsLedger::new();
        ledger.add_points(7250).unwrap();
        let progress = ledger.progress_to_next_level();
        assert_eq!(progress.level, 50);
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.next_level_threshold, 5000);
    }

    #[test]
    fn award_uses_reward_table() {
        let mut ledger = PointsLedger::new();
        let table = RewardTable::default();
        ledger.award(RewardAction::CompleteGoal, &table).unwrap();
        ledger.award(RewardAction::LogExpense, &table).unwrap();
        assert_eq!(ledger.stats().points(), 53);
        assert_eq!(ledger.events()[1].action, Some(RewardAction::LogExpense));
    }

    #[test]
    fn award_with_zero_configured_points_fails() {
        let mut ledger = PointsLedger::new();
        let table = RewardTable {
            log_mood: 0,
            ..Default::default()
        };
        assert!(matches!(
            ledger.award(RewardAction::LogMood, &table),
            Err(GamificationError::InvalidAmount { amount: 0 })
        ));
    }

    #[test]
    fn duplicate_badge_is_rejected() {
        let mut ledger = PointsLedger::new();
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let badge = ledger.add_badge_at(&week_warrior(), at).unwrap();
        assert_eq!(badge.awarded_at, at);

        let err = ledger.add_badge(&week_warrior()).unwrap_err();
        assert_eq!(
            err,
            GamificationError::DuplicateBadge {
                id: "week-warrior".into()
            }
        );
        assert_eq!(ledger.stats().badges().len(), 1);
    }

    #[test]
    fn award_eligible_skips_held_badges() {
        let mut ledger = PointsLedger::new();
        let catalog = BadgeCatalog::standard();
        let activity = ActivitySnapshot {
            current_streak: 9,
            goals_completed: 5,
            ..Default::default()
        };

        let first = ledger.award_eligible(&catalog, &activity);
        assert_eq!(first.len(), 2);
        let second = ledger.award_eligible(&catalog, &activity);
        assert!(second.is_empty());
        assert_eq!(ledger.stats().badges().len(), 2);
    }

    #[test]
    fn default_stats_track_named_streaks() {
        let mut ledger = PointsLedger::new();
        assert_eq!(ledger.stats().streak("mood"), 0);
        ledger.record_streak("mood", 4);
        assert_eq!(ledger.stats().streak("mood"), 4);
        assert_eq!(ledger.stats().streak("unknown"), 0);
    }

    #[test]
    fn stats_round_trip_recomputes_level() {
        let mut ledger = PointsLedger::new();
        ledger.add_points(420).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        ledger.add_badge_at(&week_warrior(), at).unwrap();
        let catalog = BadgeCatalog::standard();
        let first = catalog.get("first-entry").unwrap();
        ledger.add_badge_at(first, at).unwrap();

        let json = serde_json::to_string(ledger.stats()).unwrap();
        let restored: UserStats = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, ledger.stats());
        assert_eq!(restored.badges()[0].id, "week-warrior");
        assert_eq!(restored.badges()[1].id, "first-entry");
    }

    #[test]
    fn stored_level_is_ignored_on_load() {
        let raw = r#"{"points": 250, "level": 42, "badges": [], "streaks": {}}"#;
        let stats: UserStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.level(), 3);
    }

    proptest! {
        #[test]
        fn level_matches_formula_and_is_monotonic(p in 0u64..20_000) {
            let expected = std::cmp::min(p / 100 + 1, 50) as u32;
            prop_assert_eq!(level_for(p), expected);
            prop_assert!(level_for(p + 1) >= level_for(p));
        }

        #[test]
        fn add_points_is_additive(a in 1i64..5_000, b in 1i64..5_000) {
            let mut split = PointsLedger::new();
            split.add_points(a).unwrap();
            let split_update = split.add_points(b).unwrap();

            let mut single = PointsLedger::new();
            let single_update = single.add_points(a + b).unwrap();

            prop_assert_eq!(split_update, single_update);
        }
    }
}
