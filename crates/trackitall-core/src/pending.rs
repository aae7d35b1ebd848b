//! Undoable removals.
//!
//! Deleting an item is split in two phases. [`PendingRemovals::stage`] takes
//! the item out of the visible list and parks it with a commit deadline;
//! until that deadline passes, [`PendingRemovals::undo`] hands it back for
//! restoration. Once due, [`PendingRemovals::commit_due`] releases the items
//! so the persistence layer can delete them for good.
//!
//! [`deferred_commit`] is the timer-driven variant for callers running on a
//! tokio runtime: the commit closure runs after the grace period unless the
//! returned [`CancelHandle`] is cancelled first.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::storage::UndoConfig;

/// Default undo window.
pub const DEFAULT_GRACE_SECS: i64 = 5;

struct Pending<V> {
    value: V,
    commit_at: DateTime<Utc>,
}

/// Items removed tentatively, waiting for their commit deadline.
pub struct PendingRemovals<K, V> {
    grace: Duration,
    entries: HashMap<K, Pending<V>>,
}

impl<K, V> PendingRemovals<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            entries: HashMap::new(),
        }
    }

    /// Use the configured grace period. Negative values count as zero.
    pub fn from_config(config: &UndoConfig) -> Self {
        Self::new(Duration::seconds(config.grace_period_secs.max(0)))
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Park `value` under `key` and return its commit deadline.
    ///
    /// Staging a key that is already pending replaces the earlier entry and
    /// restarts its grace period.
    pub fn stage(&mut self, key: K, value: V, now: DateTime<Utc>) -> DateTime<Utc> {
        let commit_at = now + self.grace;
        self.entries.insert(key, Pending { value, commit_at });
        commit_at
    }

    /// Cancel a pending removal and return the value for restoration.
    pub fn undo(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|pending| pending.value)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.entries.values().map(|p| p.commit_at).min()
    }

    /// Remove and return every entry whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn commit_due(&mut self, now: DateTime<Utc>) -> Vec<(K, V)> {
        let due: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, pending)| pending.commit_at <= now)
            .map(|(key, _)| key.clone())
            .collect();

        let mut committed: Vec<(DateTime<Utc>, K, V)> = due
            .into_iter()
            .filter_map(|key| {
                self.entries
                    .remove(&key)
                    .map(|pending| (pending.commit_at, key, pending.value))
            })
            .collect();
        committed.sort_by_key(|(at, _, _)| *at);

        if !committed.is_empty() {
            tracing::info!(count = committed.len(), "committed pending removals");
        }
        committed
            .into_iter()
            .map(|(_, key, value)| (key, value))
            .collect()
    }
}

impl<K, V> Default for PendingRemovals<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_GRACE_SECS))
    }
}

/// Handle to a commit scheduled by [`deferred_commit`].
pub struct CancelHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<bool>,
}

impl CancelHandle {
    /// Stop the commit if it has not started. Returns whether it was stopped.
    pub fn cancel(&mut self) -> bool {
        match self.cancel.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Wait for the task. Resolves `true` if the commit ran.
    pub async fn finished(self) -> bool {
        self.task.await.unwrap_or(false)
    }
}

/// Run `commit` after `grace` unless cancelled first.
///
/// Dropping the handle without cancelling lets the commit proceed.
pub fn deferred_commit<F, Fut>(grace: std::time::Duration, commit: F) -> CancelHandle
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let sleep = tokio::time::sleep(grace);
        tokio::pin!(sleep);

        let cancelled = tokio::select! {
            _ = &mut sleep => false,
            // A dropped sender is not a cancellation.
            res = rx => res.is_ok(),
        };
        if cancelled {
            tracing::debug!("deferred commit cancelled");
            return false;
        }

        sleep.await;
        commit().await;
        true
    });

    CancelHandle {
        cancel: Some(tx),
        task,
    }
}
