use clap::Subcommand;
use serde_json::json;
use trackitall_core::{Config, RewardAction, SnapshotStore};

use super::{parse_day, print_json, CommandResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Flip a day's completion for a habit (default: today)
    Toggle {
        name: String,
        /// Day to toggle, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Show streak figures for a habit
    Show {
        name: String,
        /// Evaluate as of this day, YYYY-MM-DD
        #[arg(long)]
        as_of: Option<String>,
        /// Trailing window in days (default from config)
        #[arg(long)]
        window: Option<u32>,
    },
    /// List tracked habits
    List,
}

pub fn run(action: HabitAction) -> CommandResult {
    let store = SnapshotStore::open()?;
    let mut snapshot = store.load()?;
    let config = Config::load_or_default();

    match action {
        HabitAction::Toggle { name, date } => {
            let day = parse_day(date.as_deref())?;
            let today = parse_day(None)?;
            let completed = snapshot.habit_mut(&name).toggle(day);
            let summary = snapshot
                .habit_mut(&name)
                .evaluate(today, config.streaks.window_days)?;

            let mut ledger = snapshot.ledger();
            if completed {
                ledger.award(RewardAction::DailyStreak, &config.rewards)?;
            }
            ledger.record_streak(&name, summary.current_streak);
            snapshot.apply_ledger(ledger);
            store.save(&snapshot)?;

            print_json(&json!({
                "habit": name,
                "date": day,
                "completed": completed,
                "summary": summary,
            }))?;
        }
        HabitAction::Show {
            name,
            as_of,
            window,
        } => {
            if !snapshot.habits.contains_key(&name) {
                return Err(format!("unknown habit: {name}").into());
            }
            let as_of = parse_day(as_of.as_deref())?;
            let window = window.unwrap_or(config.streaks.window_days);
            let tracker = snapshot.habit_mut(&name);
            let summary = tracker.evaluate(as_of, window)?;
            let last_week = tracker.recent_marks(as_of, 7);
            store.save(&snapshot)?;
            print_json(&json!({
                "habit": name,
                "summary": summary,
                "last_7_days": last_week,
            }))?;
        }
        HabitAction::List => {
            let names: Vec<&String> = snapshot.habits.keys().collect();
            print_json(&names)?;
        }
    }
    Ok(())
}
