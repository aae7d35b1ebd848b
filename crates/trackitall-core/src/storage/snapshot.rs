//! JSON snapshot of one user's state.
//!
//! The engine itself never does I/O; this store is the persistence
//! collaborator used when the engine runs standalone (the CLI). The whole
//! state is read before a command and written back after it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{CoreError, StoreError};
use crate::gamification::{PointEvent, PointsLedger, UserStats};
use crate::habits::StreakTracker;
use crate::stats::CategoryRecord;

/// Everything the CLI keeps between invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub stats: UserStats,
    #[serde(default)]
    pub events: Vec<PointEvent>,
    #[serde(default)]
    pub habits: BTreeMap<String, StreakTracker>,
    #[serde(default)]
    pub records: Vec<CategoryRecord>,
}

impl Snapshot {
    /// A ledger over a copy of the stored stats and events.
    pub fn ledger(&self) -> PointsLedger {
        PointsLedger::with_events(self.stats.clone(), self.events.clone())
    }

    /// Write a ledger's state back into the snapshot.
    pub fn apply_ledger(&mut self, ledger: PointsLedger) {
        let (stats, events) = ledger.into_parts();
        self.stats = stats;
        self.events = events;
    }

    pub fn habit_mut(&mut self, name: &str) -> &mut StreakTracker {
        self.habits.entry(name.to_string()).or_default()
    }
}

/// File-backed [`Snapshot`] storage.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store at `~/.config/trackitall/state.json`.
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self::at(data_dir()?.join("state.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is an empty snapshot.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot yet");
                return Ok(Snapshot::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the snapshot, replacing the file atomically.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let content = serde_json::to_string_pretty(snapshot).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}
