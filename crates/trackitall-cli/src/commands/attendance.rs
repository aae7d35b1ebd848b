use clap::Subcommand;
use serde_json::json;
use trackitall_core::{AttendanceSummary, Config};

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum AttendanceAction {
    /// Percentage, status and lectures needed for one course
    Summary {
        #[arg(long)]
        attended: u32,
        #[arg(long)]
        total: u32,
        /// Target percentage (default from config)
        #[arg(long)]
        target: Option<u32>,
    },
}

pub fn run(action: AttendanceAction) -> CommandResult {
    match action {
        AttendanceAction::Summary {
            attended,
            total,
            target,
        } => {
            if attended > total {
                return Err(format!("attended ({attended}) exceeds total ({total})").into());
            }
            let summary = AttendanceSummary::new(attended, total);
            let config = Config::load_or_default().attendance;
            let (target, needed) = match target {
                Some(target) => (target, summary.lectures_needed(target)),
                None => (config.target_percentage, summary.lectures_to_target(&config)),
            };
            print_json(&json!({
                "attended": summary.attended,
                "total": summary.total,
                "percentage": summary.percentage,
                "status": summary.status(),
                "target": target,
                "lectures_needed": needed,
            }))?;
        }
    }
    Ok(())
}
