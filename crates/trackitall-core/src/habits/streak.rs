//! Consecutive-day habit streaks.
//!
//! A habit's completions are a set of calendar days. The current streak is
//! counted backward from an "as of" day and is bounded by a trailing window
//! (30 days by default). The best streak is a high-water mark: it only moves
//! when a streak is evaluated, and it never moves down.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::GamificationError;

/// Default trailing window for streaks and completion rates.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// One day's completion state for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMark {
    pub date: NaiveDate,
    pub completed: bool,
}

/// Evaluated streak figures for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub as_of: NaiveDate,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Percentage (0-100) of the trailing window with a completion
    pub completion_rate: u8,
    pub total_completions: usize,
}

/// Completion marks for one habit plus its best-streak high-water mark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakTracker {
    #[serde(default)]
    completions: BTreeSet<NaiveDate>,
    #[serde(default)]
    best_streak: u32,
}

/// First day of the `days`-day window ending at `as_of`, clamped to the
/// earliest representable date.
fn window_start(as_of: NaiveDate, days: u32) -> NaiveDate {
    let back = u64::from(days.saturating_sub(1));
    as_of.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the mark for `date`. Returns whether the day is now completed.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.completions.remove(&date) {
            false
        } else {
            self.completions.insert(date);
            true
        }
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.completions.contains(&date)
    }

    pub fn mark(&self, date: NaiveDate) -> CompletionMark {
        CompletionMark {
            date,
            completed: self.is_completed(date),
        }
    }

    /// Marks for the `days` days ending at `as_of`, oldest first.
    ///
    /// Days before [`NaiveDate::MIN`] are left out.
    pub fn recent_marks(&self, as_of: NaiveDate, days: u32) -> Vec<CompletionMark> {
        if days == 0 {
            return Vec::new();
        }
        window_start(as_of, days)
            .iter_days()
            .take_while(|day| *day <= as_of)
            .map(|day| self.mark(day))
            .collect()
    }

    pub fn total_completions(&self) -> usize {
        self.completions.len()
    }

    /// Consecutive completed days ending at `as_of`, at most `window_days`.
    ///
    /// Returns 0 when `as_of` itself is not completed. This is a pure read:
    /// only [`evaluate`](Self::evaluate) raises [`best_streak`](Self::best_streak).
    pub fn current_streak(&self, as_of: NaiveDate, window_days: u32) -> u32 {
        let mut streak = 0;
        let mut day = Some(as_of);
        while let Some(current) = day {
            if streak >= window_days || !self.completions.contains(&current) {
                break;
            }
            streak += 1;
            day = current.pred_opt();
        }
        streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Share of the `window_days` days ending at `as_of` that are completed,
    /// as a rounded percentage.
    ///
    /// # Errors
    /// Returns [`GamificationError::InvalidPeriod`] if `window_days` is 0.
    pub fn completion_rate(
        &self,
        as_of: NaiveDate,
        window_days: u32,
    ) -> Result<u8, GamificationError> {
        if window_days == 0 {
            return Err(GamificationError::InvalidPeriod { days: 0 });
        }
        let oldest = window_start(as_of, window_days);
        let completed = self.completions.range(oldest..=as_of).count();
        let rate = (completed as f64 / f64::from(window_days) * 100.0).round();
        Ok(rate.min(100.0) as u8)
    }

    /// Evaluate the streak as of `as_of` and raise the best streak if beaten.
    pub fn evaluate(
        &mut self,
        as_of: NaiveDate,
        window_days: u32,
    ) -> Result<StreakSummary, GamificationError> {
        let completion_rate = self.completion_rate(as_of, window_days)?;
        let current_streak = self.current_streak(as_of, window_days);
        if current_streak > self.best_streak {
            tracing::debug!(
                previous = self.best_streak,
                best = current_streak,
                "new best streak"
            );
            self.best_streak = current_streak;
        }
        Ok(StreakSummary {
            as_of,
            current_streak,
            best_streak: self.best_streak,
            completion_rate,
            total_completions: self.completions.len(),
        })
    }
}
