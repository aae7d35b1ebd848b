use chrono::Utc;
use clap::Subcommand;
use serde_json::json;
use trackitall_core::dates::parse_month;
use trackitall_core::{
    month_window, CategoryAggregator, CategoryRecord, Config, RewardAction, SnapshotStore,
};

use super::{parse_day, print_json, CommandResult};

#[derive(Subcommand)]
pub enum ExpenseAction {
    /// Record an expense
    Add {
        category: String,
        amount: f64,
        /// Day of the expense, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Per-category totals for a month
    Totals {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
}

pub fn run(action: ExpenseAction) -> CommandResult {
    let store = SnapshotStore::open()?;
    let mut snapshot = store.load()?;

    match action {
        ExpenseAction::Add {
            category,
            amount,
            date,
        } => {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("invalid amount: {amount}").into());
            }
            let day = parse_day(date.as_deref())?;
            snapshot
                .records
                .push(CategoryRecord::new(day, category.as_str(), amount));

            let config = Config::load_or_default();
            let mut ledger = snapshot.ledger();
            let update = ledger.award(RewardAction::LogExpense, &config.rewards)?;
            snapshot.apply_ledger(ledger);
            store.save(&snapshot)?;

            print_json(&json!({
                "category": category,
                "amount": amount,
                "date": day,
                "update": update,
            }))?;
        }
        ExpenseAction::Totals { month } => {
            let today = Utc::now().date_naive();
            let window = match month.as_deref() {
                Some(label) => parse_month(label)
                    .ok_or_else(|| format!("invalid month '{label}' (expected YYYY-MM)"))?,
                None => month_window(today),
            };
            // The running month averages over the days elapsed so far.
            let period_days = if window.contains(today) {
                (today - window.start).num_days() + 1
            } else {
                window.len_days()
            };

            let aggregator = CategoryAggregator::new();
            let totals = aggregator.totals_in(&snapshot.records, window);
            let total: f64 = totals.values().sum();
            print_json(&json!({
                "start": window.start,
                "end": window.end,
                "categories": aggregator.breakdown(&totals),
                "total": total,
                "daily_average": aggregator.daily_average(total, period_days)?,
            }))?;
        }
    }
    Ok(())
}
