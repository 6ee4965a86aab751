//! Write-through statistics.
//!
//! Counters let operators see how often the index falls behind the
//! primary store without scraping logs.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sync service counters.
///
/// All counters are atomic and monotonically increasing.
#[derive(Debug, Default)]
pub struct SyncStats {
    /// Mutations mirrored into the index.
    synced_writes: AtomicU64,
    /// Mutations whose index write failed.
    unindexed_writes: AtomicU64,
    /// Mutations rejected by the primary store or a precondition.
    failed_writes: AtomicU64,
    /// Search requests served.
    searches: AtomicU64,
    /// Search requests that failed.
    failed_searches: AtomicU64,
}

impl SyncStats {
    /// Creates a zeroed stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_synced_write(&self) {
        self.synced_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unindexed_write(&self) {
        self.unindexed_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed_write(&self) {
        self.failed_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed_search(&self) {
        self.failed_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of mutations mirrored into the index.
    pub fn synced_writes(&self) -> u64 {
        self.synced_writes.load(Ordering::Relaxed)
    }

    /// Returns the number of mutations stored but not indexed.
    pub fn unindexed_writes(&self) -> u64 {
        self.unindexed_writes.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected mutations.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Returns the number of searches.
    pub fn searches(&self) -> u64 {
        self.searches.load(Ordering::Relaxed)
    }

    /// Returns the number of failed searches.
    pub fn failed_searches(&self) -> u64 {
        self.failed_searches.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            synced_writes: self.synced_writes(),
            unindexed_writes: self.unindexed_writes(),
            failed_writes: self.failed_writes(),
            searches: self.searches(),
            failed_searches: self.failed_searches(),
        }
    }
}

/// A point-in-time copy of [`SyncStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Mutations mirrored into the index.
    pub synced_writes: u64,
    /// Mutations stored but not indexed.
    pub unindexed_writes: u64,
    /// Rejected mutations.
    pub failed_writes: u64,
    /// Searches served.
    pub searches: u64,
    /// Failed searches.
    pub failed_searches: u64,
}
