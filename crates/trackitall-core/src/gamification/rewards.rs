//! Point rewards per user action.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user action that earns points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardAction {
    LogData,
    CompleteGoal,
    DailyStreak,
    WeeklyStreak,
    MonthlyStreak,
    FirstEntry,
    MarkAttendance,
    LogExpense,
    LogMood,
    LogHealth,
}

impl RewardAction {
    pub const ALL: [RewardAction; 10] = [
        RewardAction::LogData,
        RewardAction::CompleteGoal,
        RewardAction::DailyStreak,
        RewardAction::WeeklyStreak,
        RewardAction::MonthlyStreak,
        RewardAction::FirstEntry,
        RewardAction::MarkAttendance,
        RewardAction::LogExpense,
        RewardAction::LogMood,
        RewardAction::LogHealth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RewardAction::LogData => "log_data",
            RewardAction::CompleteGoal => "complete_goal",
            RewardAction::DailyStreak => "daily_streak",
            RewardAction::WeeklyStreak => "weekly_streak",
            RewardAction::MonthlyStreak => "monthly_streak",
            RewardAction::FirstEntry => "first_entry",
            RewardAction::MarkAttendance => "mark_attendance",
            RewardAction::LogExpense => "log_expense",
            RewardAction::LogMood => "log_mood",
            RewardAction::LogHealth => "log_health",
        }
    }
}

impl fmt::Display for RewardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        RewardAction::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| format!("unknown reward action: {s}"))
    }
}

/// Points granted per action. Stored as the `[rewards]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    #[serde(default = "default_log_data")]
    pub log_data: u32,
    #[serde(default = "default_complete_goal")]
    pub complete_goal: u32,
    #[serde(default = "default_daily_streak")]
    pub daily_streak: u32,
    #[serde(default = "default_weekly_streak")]
    pub weekly_streak: u32,
    #[serde(default = "default_monthly_streak")]
    pub monthly_streak: u32,
    #[serde(default = "default_first_entry")]
    pub first_entry: u32,
    #[serde(default = "default_5")]
    pub mark_attendance: u32,
    #[serde(default = "default_log_expense")]
    pub log_expense: u32,
    #[serde(default = "default_5")]
    pub log_mood: u32,
    #[serde(default = "default_5")]
    pub log_health: u32,
}

fn default_log_data() -> u32 {
    10
}
fn default_complete_goal() -> u32 {
    50
}
fn default_daily_streak() -> u32 {
    5
}
fn default_weekly_streak() -> u32 {
    25
}
fn default_monthly_streak() -> u32 {
    100
}
fn default_first_entry() -> u32 {
    20
}
fn default_log_expense() -> u32 {
    3
}
fn default_5() -> u32 {
    5
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            log_data: default_log_data(),
            complete_goal: default_complete_goal(),
            daily_streak: default_daily_streak(),
            weekly_streak: default_weekly_streak(),
            monthly_streak: default_monthly_streak(),
            first_entry: default_first_entry(),
            mark_attendance: default_5(),
            log_expense: default_log_expense(),
            log_mood: default_5(),
            log_health: default_5(),
        }
    }
}

impl RewardTable {
    pub fn points_for(&self, action: RewardAction) -> u32 {
        match action {
            RewardAction::LogData => self.log_data,
            RewardAction::CompleteGoal => self.complete_goal,
            RewardAction::DailyStreak => self.daily_streak,
            RewardAction::WeeklyStreak => self.weekly_streak,
            RewardAction::MonthlyStreak => self.monthly_streak,
            RewardAction::FirstEntry => self.first_entry,
            RewardAction::MarkAttendance => self.mark_attendance,
            RewardAction::LogExpense => self.log_expense,
            RewardAction::LogMood => self.log_mood,
            RewardAction::LogHealth => self.log_health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_dashboard_rewards() {
        let table = RewardTable::default();
        assert_eq!(table.points_for(RewardAction::LogData), 10);
        assert_eq!(table.points_for(RewardAction::CompleteGoal), 50);
        assert_eq!(table.points_for(RewardAction::DailyStreak), 5);
        assert_eq!(table.points_for(RewardAction::MonthlyStreak), 100);
        assert_eq!(table.points_for(RewardAction::LogExpense), 3);
    }

    #[test]
    fn action_parses_from_cli_spelling() {
        assert_eq!("log-expense".parse::<RewardAction>(), Ok(RewardAction::LogExpense));
        assert_eq!("DAILY_STREAK".parse::<RewardAction>(), Ok(RewardAction::DailyStreak));
        assert!("dance".parse::<RewardAction>().is_err());
    }

    #[test]
    fn partial_table_fills_defaults() {
        let table: RewardTable = toml::from_str("log_data = 12").unwrap();
        assert_eq!(table.log_data, 12);
        assert_eq!(table.complete_goal, 50);
    }
}
