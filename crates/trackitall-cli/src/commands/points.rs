use clap::Subcommand;
use serde_json::json;
use trackitall_core::{Config, RewardAction, SnapshotStore};

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum PointsAction {
    /// Add an arbitrary number of points
    Add {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Award the configured points for an action (e.g. log-expense)
    Award { action: String },
    /// Show points, level and progress
    Show,
}

pub fn run(action: PointsAction) -> CommandResult {
    let store = SnapshotStore::open()?;
    let mut snapshot = store.load()?;
    let mut ledger = snapshot.ledger();

    match action {
        PointsAction::Add { amount } => {
            let update = ledger.add_points(amount)?;
            snapshot.apply_ledger(ledger);
            store.save(&snapshot)?;
            print_json(&update)?;
        }
        PointsAction::Award { action } => {
            let action: RewardAction = action.parse()?;
            let config = Config::load_or_default();
            let update = ledger.award(action, &config.rewards)?;
            snapshot.apply_ledger(ledger);
            store.save(&snapshot)?;
            print_json(&json!({ "action": action, "update": update }))?;
        }
        PointsAction::Show => {
            let stats = ledger.stats();
            print_json(&json!({
                "points": stats.points(),
                "level": stats.level(),
                "progress": ledger.progress_to_next_level(),
                "badges": stats.badges(),
                "streaks": stats.streaks(),
            }))?;
        }
    }
    Ok(())
}
