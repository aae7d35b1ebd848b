use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde_json::json;
use trackitall_core::{Config, LeaderboardRanker, ScoredEntry};

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum LeaderboardAction {
    /// Rank entries from a JSON file of `[{"id": .., "points": ..}]`
    Rank {
        file: PathBuf,
        /// Require the first N places; errors on an empty file (default: config top_n, no error)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the 1-based rank of one id
    RankOf { file: PathBuf, id: String },
}

fn read_entries(file: &Path) -> Result<Vec<ScoredEntry>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let entries: Vec<ScoredEntry> = serde_json::from_str(&content)?;
    tracing::debug!(count = entries.len(), file = %file.display(), "read leaderboard entries");
    Ok(entries)
}

pub fn run(action: LeaderboardAction) -> CommandResult {
    let ranker = LeaderboardRanker::new();
    match action {
        LeaderboardAction::Rank { file, top } => {
            let entries = read_entries(&file)?;
            let ranked = match top {
                Some(n) => ranker.top(&entries, n)?,
                None => {
                    // An empty board is a valid ranking; only an explicit --top demands rows.
                    let mut ranked = ranker.rank(&entries);
                    ranked.truncate(Config::load_or_default().leaderboard.top_n);
                    ranked
                }
            };
            print_json(&ranked)?;
        }
        LeaderboardAction::RankOf { file, id } => {
            let entries = read_entries(&file)?;
            let rank = ranker.rank_of(&entries, &id).rank();
            print_json(&json!({ "id": id, "rank": rank }))?;
        }
    }
    Ok(())
}
