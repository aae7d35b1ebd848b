use clap::Subcommand;
use serde_json::json;
use trackitall_core::{ActivitySnapshot, BadgeCatalog, SnapshotStore};

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum BadgeAction {
    /// Award every badge the given activity qualifies for
    Check {
        #[arg(long, default_value_t = 0)]
        logs: u32,
        #[arg(long, default_value_t = 0)]
        streak: u32,
        #[arg(long, default_value_t = 0)]
        mood_streak: u32,
        #[arg(long, default_value_t = 0)]
        workouts: u32,
        #[arg(long, default_value_t = 0)]
        goals: u32,
        #[arg(long, default_value_t = 0)]
        expenses: u32,
        #[arg(long, default_value_t = 0)]
        health_days: u32,
        /// Best course attendance percentage
        #[arg(long, default_value_t = 0)]
        attendance: u32,
        #[arg(long)]
        budget_month: bool,
        #[arg(long)]
        savings_goal: bool,
    },
    /// List the catalog and which badges are held
    List,
}

pub fn run(action: BadgeAction) -> CommandResult {
    let store = SnapshotStore::open()?;
    let mut snapshot = store.load()?;
    let catalog = BadgeCatalog::standard();

    match action {
        BadgeAction::Check {
            logs,
            streak,
            mood_streak,
            workouts,
            goals,
            expenses,
            health_days,
            attendance,
            budget_month,
            savings_goal,
        } => {
            let activity = ActivitySnapshot {
                total_logs: logs,
                current_streak: streak,
                mood_streak,
                workout_count: workouts,
                goals_completed: goals,
                expense_count: expenses,
                health_tracked_days: health_days,
                best_attendance_percentage: attendance,
                stayed_within_budget_month: budget_month,
                reached_savings_goal: savings_goal,
            };
            let mut ledger = snapshot.ledger();
            let awarded = ledger.award_eligible(&catalog, &activity);
            snapshot.apply_ledger(ledger);
            store.save(&snapshot)?;
            print_json(&awarded)?;
        }
        BadgeAction::List => {
            let rows: Vec<_> = catalog
                .definitions()
                .iter()
                .map(|def| {
                    json!({
                        "id": def.id,
                        "name": def.name,
                        "icon": def.icon,
                        "description": def.description,
                        "held": snapshot.stats.has_badge(&def.id),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
    }
    Ok(())
}
