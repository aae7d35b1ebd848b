//! Stable point-based ranking.

use serde::{Deserialize, Serialize};

use crate::error::GamificationError;
use crate::gamification::{level_for, UserStats};

/// Anything that can be placed on a leaderboard.
pub trait Scored {
    fn id(&self) -> &str;
    fn points(&self) -> u64;
}

/// Minimal `{id, points}` input pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub id: String,
    pub points: u64,
}

impl ScoredEntry {
    pub fn new(id: impl Into<String>, points: u64) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }
}

impl Scored for ScoredEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn points(&self) -> u64 {
        self.points
    }
}

/// Denormalized per-user leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub points: u64,
    pub level: u32,
}

impl LeaderboardEntry {
    /// Build a row, falling back to the user id when no name is known.
    pub fn new(user_id: impl Into<String>, display_name: Option<&str>, points: u64) -> Self {
        let user_id = user_id.into();
        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| user_id.clone());
        Self {
            user_id,
            display_name,
            points,
            level: level_for(points),
        }
    }

    pub fn from_stats(user_id: impl Into<String>, display_name: Option<&str>, stats: &UserStats) -> Self {
        Self::new(user_id, display_name, stats.points())
    }
}

impl Scored for LeaderboardEntry {
    fn id(&self) -> &str {
        &self.user_id
    }

    fn points(&self) -> u64 {
        self.points
    }
}

/// One ranked row. Ranks are 1-based and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub id: String,
    pub points: u64,
}

/// Where an id landed in a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankPosition {
    Ranked(usize),
    Unranked,
}

impl RankPosition {
    pub fn rank(&self) -> Option<usize> {
        match self {
            RankPosition::Ranked(rank) => Some(*rank),
            RankPosition::Unranked => None,
        }
    }
}

/// Orders entries by points, highest first. Equal points keep input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardRanker;

impl LeaderboardRanker {
    pub fn new() -> Self {
        Self
    }

    pub fn rank<E: Scored>(&self, entries: &[E]) -> Vec<RankedEntry> {
        let mut order: Vec<&E> = entries.iter().collect();
        // sort_by is stable, which gives the insertion-order tie-break.
        order.sort_by(|a, b| b.points().cmp(&a.points()));
        tracing::debug!(entries = order.len(), "ranked leaderboard");
        order
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| RankedEntry {
                rank: idx + 1,
                id: entry.id().to_string(),
                points: entry.points(),
            })
            .collect()
    }

    /// Rank of `id`, or [`RankPosition::Unranked`] if it is not present.
    pub fn rank_of<E: Scored>(&self, entries: &[E], id: &str) -> RankPosition {
        self.rank(entries)
            .into_iter()
            .find(|row| row.id == id)
            .map_or(RankPosition::Unranked, |row| RankPosition::Ranked(row.rank))
    }

    /// The first `n` rows of the ranking.
    ///
    /// # Errors
    /// Returns [`GamificationError::EmptyInput`] when `n > 0` and there is
    /// nothing to rank.
    pub fn top<E: Scored>(&self, entries: &[E], n: usize) -> Result<Vec<RankedEntry>, GamificationError> {
        if n > 0 && entries.is_empty() {
            return Err(GamificationError::EmptyInput { requested: n });
        }
        let mut ranked = self.rank(entries);
        ranked.truncate(n);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ScoredEntry> {
        vec![
            ScoredEntry::new("a", 50),
            ScoredEntry::new("b", 80),
            ScoredEntry::new("c", 80),
        ]
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = LeaderboardRanker::new().rank(&sample());
        assert_eq!(
            ranked,
            vec![
                RankedEntry { rank: 1, id: "b".into(), points: 80 },
                RankedEntry { rank: 2, id: "c".into(), points: 80 },
                RankedEntry { rank: 3, id: "a".into(), points: 50 },
            ]
        );
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        let entries: Vec<ScoredEntry> = Vec::new();
        assert!(LeaderboardRanker::new().rank(&entries).is_empty());
        assert_eq!(LeaderboardRanker::new().top(&entries, 0), Ok(Vec::new()));
    }

    #[test]
    fn rank_of_missing_id_is_unranked() {
        let ranker = LeaderboardRanker::new();
        assert_eq!(ranker.rank_of(&sample(), "c"), RankPosition::Ranked(2));
        assert_eq!(ranker.rank_of(&sample(), "zed"), RankPosition::Unranked);
        assert_eq!(RankPosition::Unranked.rank(), None);
    }

    #[test]
    fn top_truncates_and_requires_input() {
        let ranker = LeaderboardRanker::new();
        let top = ranker.top(&sample(), 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].id, "c");
        assert_eq!(ranker.top(&sample(), 10).unwrap().len(), 3);

        let entries: Vec<ScoredEntry> = Vec::new();
        assert_eq!(
            ranker.top(&entries, 10),
            Err(GamificationError::EmptyInput { requested: 10 })
        );
    }

    #[test]
    fn leaderboard_entry_derives_level_and_name() {
        let entry = LeaderboardEntry::new("uid-1", Some("  "), 512);
        assert_eq!(entry.display_name, "uid-1");
        assert_eq!(entry.level, 6);

        let named = LeaderboardEntry::new("uid-2", Some("Asha"), 10);
        assert_eq!(named.display_name, "Asha");
        assert_eq!(named.level, 1);
    }

    #[test]
    fn ranks_leaderboard_rows() {
        let rows = vec![
            LeaderboardEntry::new("u1", Some("One"), 120),
            LeaderboardEntry::new("u2", Some("Two"), 300),
        ];
        let ranked = LeaderboardRanker::new().rank(&rows);
        assert_eq!(ranked[0].id, "u2");
        assert_eq!(ranked[1].rank, 2);
    }
}
