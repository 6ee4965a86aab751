//! Sync service configuration.

use std::time::Duration;

/// Configuration for an [`crate::EntitySyncService`].
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upper bound on a single search index call.
    ///
    /// Applies to mirror writes and to queries. An expired mirror write is
    /// treated as an index failure; the primary store write stands.
    pub index_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            index_timeout: Duration::from_secs(5),
        }
    }
}

impl SyncConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index call timeout.
    #[must_use]
    pub const fn index_timeout(mut self, timeout: Duration) -> Self {
        self.index_timeout = timeout;
        self
    }
}
