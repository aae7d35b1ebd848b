pub mod attendance;
pub mod badge;
pub mod config;
pub mod expense;
pub mod habit;
pub mod leaderboard;
pub mod points;

use chrono::{NaiveDate, Utc};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Parse `YYYY-MM-DD`, defaulting to today (UTC).
pub fn parse_day(value: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}").into()),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
