mod config;
pub mod snapshot;

pub use config::{
    AttendanceConfig, Config, LeaderboardConfig, StreakConfig, UndoConfig, MAX_WINDOW_DAYS,
};
pub use snapshot::{Snapshot, SnapshotStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/trackitall[-dev]/` based on TRACKITALL_ENV.
///
/// Set TRACKITALL_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TRACKITALL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("trackitall-dev")
    } else {
        base_dir.join("trackitall")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
