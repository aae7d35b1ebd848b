//! Point totals recomputed from raw activity counts.
//!
//! Used when refreshing the denormalized leaderboard from source documents
//! instead of trusting each user's stored point total.

use serde::{Deserialize, Serialize};

/// Points per completed habit.
const HABIT_POINTS: u64 = 5;
/// Points per study block and the block length in minutes.
const STUDY_BLOCK_POINTS: u64 = 2;
const STUDY_BLOCK_MINUTES: f64 = 30.0;
/// Water logs needed for one bonus point.
const WATER_LOGS_PER_POINT: u64 = 7;

/// Raw activity for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTally {
    /// One item per activity document; `None` when it carries no points
    #[serde(default)]
    pub activity_points: Vec<Option<u32>>,
    #[serde(default)]
    pub completed_habits: u32,
    /// One item per study session; `None` when no duration was recorded
    #[serde(default)]
    pub study_minutes: Vec<Option<f64>>,
    #[serde(default)]
    pub water_logs: u32,
}

impl ActivityTally {
    pub fn points(&self) -> u64 {
        let activities: u64 = self
            .activity_points
            .iter()
            .map(|p| p.map_or(1, u64::from))
            .sum();

        let habits = u64::from(self.completed_habits) * HABIT_POINTS;

        let study: u64 = self
            .study_minutes
            .iter()
            .map(|minutes| match minutes {
                Some(m) if m.is_finite() && *m > 0.0 => {
                    (m / STUDY_BLOCK_MINUTES).round() as u64 * STUDY_BLOCK_POINTS
                }
                Some(_) => 0,
                None => STUDY_BLOCK_POINTS,
            })
            .sum();

        let water = u64::from(self.water_logs) / WATER_LOGS_PER_POINT;

        activities + habits + study + water
    }
}
