//! Habit completion tracking.

mod streak;

pub use streak::{CompletionMark, StreakSummary, StreakTracker, DEFAULT_WINDOW_DAYS};
