//! Leaderboard ranking over user point totals.

mod ranker;
mod tally;

pub use ranker::{
    LeaderboardEntry, LeaderboardRanker, RankPosition, RankedEntry, Scored, ScoredEntry,
};
pub use tally::ActivityTally;
