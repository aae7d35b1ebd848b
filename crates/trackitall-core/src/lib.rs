//! # TrackItAll Core Library
//!
//! This library provides the gamification and aggregation engine behind the
//! TrackItAll student dashboard. All computation is synchronous and in-memory;
//! loading and storing user state is left to the caller, with a JSON snapshot
//! store provided for standalone use by the CLI.
//!
//! ## Architecture
//!
//! - **Gamification**: point ledger with derived levels, reward table, badges
//! - **Habits**: consecutive-day streaks over completion marks
//! - **Leaderboard**: stable ranking over user point totals
//! - **Stats**: category totals within date windows, attendance, goals,
//!   recurring expenses
//! - **Pending**: two-phase, undoable removals
//!
//! ## Key Components
//!
//! - [`PointsLedger`]: points, levels and badge awards for one user
//! - [`StreakTracker`]: current/best streak and completion rate for one habit
//! - [`LeaderboardRanker`]: ranked view over `{id, points}` entries
//! - [`CategoryAggregator`]: per-category sums and shares within a window
//! - [`Config`]: application configuration management

pub mod dates;
pub mod error;
pub mod gamification;
pub mod habits;
pub mod leaderboard;
pub mod pending;
pub mod stats;
pub mod storage;

pub use dates::{month_window, week_window, DateWindow, RecordDate};
pub use error::{ConfigError, CoreError, GamificationError, StoreError};
pub use gamification::{
    ActivitySnapshot, Badge, BadgeCatalog, BadgeDefinition, LevelProgress, PointEvent,
    PointsLedger, PointsUpdate, RewardAction, RewardTable, UserStats,
};
pub use habits::{CompletionMark, StreakSummary, StreakTracker};
pub use leaderboard::{
    ActivityTally, LeaderboardEntry, LeaderboardRanker, RankPosition, RankedEntry, ScoredEntry,
};
pub use pending::{deferred_commit, CancelHandle, PendingRemovals};
pub use stats::{
    AttendanceStatus, AttendanceSummary, CategoryAggregator, CategoryRecord, CategoryTotals,
    Frequency, RecurringExpense,
};
pub use storage::{Config, Snapshot, SnapshotStore};
