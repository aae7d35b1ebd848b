//! Badge catalog and eligibility checks.
//!
//! A [`BadgeDefinition`] describes an achievement; once awarded it becomes a
//! timestamped [`Badge`] in the user's stats. Awarding is done by
//! [`PointsLedger`](super::PointsLedger), which enforces at-most-once per id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The condition under which a badge becomes eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCondition {
    FirstLog,
    Streak7,
    BudgetMonth,
    Workout50,
    SavingsGoal,
    MoodStreak7,
    Goals5,
    Attendance90,
    Health30,
    Expense100,
}

/// Aggregate activity counters used to evaluate badge conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    #[serde(default)]
    pub total_logs: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub mood_streak: u32,
    #[serde(default)]
    pub workout_count: u32,
    #[serde(default)]
    pub goals_completed: u32,
    #[serde(default)]
    pub expense_count: u32,
    #[serde(default)]
    pub health_tracked_days: u32,
    /// Best attendance percentage across courses (0-100)
    #[serde(default)]
    pub best_attendance_percentage: u32,
    #[serde(default)]
    pub stayed_within_budget_month: bool,
    #[serde(default)]
    pub reached_savings_goal: bool,
}

impl BadgeCondition {
    pub fn is_met(&self, activity: &ActivitySnapshot) -> bool {
        match self {
            // Only the very first log qualifies.
            BadgeCondition::FirstLog => activity.total_logs == 1,
            BadgeCondition::Streak7 => activity.current_streak >= 7,
            BadgeCondition::BudgetMonth => activity.stayed_within_budget_month,
            BadgeCondition::Workout50 => activity.workout_count >= 50,
            BadgeCondition::SavingsGoal => activity.reached_savings_goal,
            BadgeCondition::MoodStreak7 => activity.mood_streak >= 7,
            BadgeCondition::Goals5 => activity.goals_completed >= 5,
            BadgeCondition::Attendance90 => activity.best_attendance_percentage >= 90,
            BadgeCondition::Health30 => activity.health_tracked_days >= 30,
            BadgeCondition::Expense100 => activity.expense_count >= 100,
        }
    }
}

/// Static description of an achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub condition: BadgeCondition,
}

impl BadgeDefinition {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        condition: BadgeCondition,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            condition,
        }
    }

    /// Stamp this definition as awarded at `at`.
    pub fn award(&self, at: DateTime<Utc>) -> Badge {
        Badge {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            awarded_at: at,
        }
    }
}

/// An awarded badge. Append-only in [`UserStats`](super::UserStats).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(alias = "timestamp")]
    pub awarded_at: DateTime<Utc>,
}

/// The set of badges a user can earn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCatalog {
    definitions: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    pub fn new(definitions: Vec<BadgeDefinition>) -> Self {
        Self { definitions }
    }

    /// The ten badges shipped with the dashboard.
    pub fn standard() -> Self {
        use BadgeCondition::*;
        Self::new(vec![
            BadgeDefinition::new("first-entry", "First Entry", "Log your first data", "🌟", FirstLog),
            BadgeDefinition::new("week-warrior", "Week Warrior", "Log daily for 7 days", "💪", Streak7),
            BadgeDefinition::new("budget-master", "Budget Master", "Stay within budget for a month", "💰", BudgetMonth),
            BadgeDefinition::new("fitness-fanatic", "Fitness Fanatic", "Log 50 workouts", "🏃", Workout50),
            BadgeDefinition::new("dream-saver", "Dream Saver", "Reach a savings goal", "🎯", SavingsGoal),
            BadgeDefinition::new("mood-mentor", "Mood Mentor", "7-day mood streak", "😊", MoodStreak7),
            BadgeDefinition::new("goal-getter", "Goal Getter", "Complete 5 goals", "✨", Goals5),
            BadgeDefinition::new("perfect-attendance", "Perfect Attendance", "90%+ attendance in a course", "📚", Attendance90),
            BadgeDefinition::new("health-hero", "Health Hero", "Track all health metrics for 30 days", "❤️", Health30),
            BadgeDefinition::new("money-manager", "Money Manager", "Log 100 expenses", "💳", Expense100),
        ])
    }

    pub fn definitions(&self) -> &[BadgeDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.definitions.iter().find(|def| def.id == id)
    }

    /// Definitions whose condition holds for `activity`, in catalog order.
    pub fn eligible(&self, activity: &ActivitySnapshot) -> Vec<&BadgeDefinition> {
        self.definitions
            .iter()
            .filter(|def| def.condition.is_met(activity))
            .collect()
    }
}

impl Default for BadgeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(defs: &[&BadgeDefinition]) -> Vec<String> {
        defs.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn standard_catalog_has_unique_ids() {
        let catalog = BadgeCatalog::standard();
        let mut seen: Vec<&str> = catalog.definitions().iter().map(|d| d.id.as_str()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn first_entry_only_on_first_log() {
        let catalog = BadgeCatalog::standard();
        let first = ActivitySnapshot {
            total_logs: 1,
            ..Default::default()
        };
        assert_eq!(ids(&catalog.eligible(&first)), vec!["first-entry"]);

        let later = ActivitySnapshot {
            total_logs: 2,
            ..Default::default()
        };
        assert!(catalog.eligible(&later).is_empty());
    }

    #[test]
    fn thresholds_are_inclusive() {
        let catalog = BadgeCatalog::standard();
        let activity = ActivitySnapshot {
            current_streak: 7,
            workout_count: 50,
            goals_completed: 5,
            expense_count: 100,
            best_attendance_percentage: 90,
            ..Default::default()
        };
        assert_eq!(
            ids(&catalog.eligible(&activity)),
            vec![
                "week-warrior",
                "fitness-fanatic",
                "goal-getter",
                "perfect-attendance",
                "money-manager"
            ]
        );
    }

    #[test]
    fn badge_accepts_legacy_timestamp_field() {
        let raw = r#"{"id":"first-entry","name":"First Entry","description":"d","icon":"🌟",
                      "timestamp":"2024-01-05T10:00:00Z"}"#;
        let badge: Badge = serde_json::from_str(raw).unwrap();
        assert_eq!(badge.awarded_at.to_rfc3339(), "2024-01-05T10:00:00+00:00");
    }
}
