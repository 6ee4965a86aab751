//! Mutation outcomes.

use crate::error::IndexError;

/// Result of a successful mutation.
///
/// Both variants mean the primary store accepted the write. `Stored` also
/// carries the index failure that left the search index stale for this
/// record.
#[derive(Debug)]
pub enum SyncOutcome<T> {
    /// Written to the primary store and mirrored into the index.
    Synced(T),
    /// Written to the primary store only.
    Stored {
        /// The persisted value.
        value: T,
        /// Why the index write did not happen.
        index_error: IndexError,
    },
}

impl<T> SyncOutcome<T> {
    /// Returns the persisted value.
    pub fn value(&self) -> &T {
        match self {
            Self::Synced(value) | Self::Stored { value, .. } => value,
        }
    }

    /// Consumes the outcome, returning the persisted value.
    pub fn into_value(self) -> T {
        match self {
            Self::Synced(value) | Self::Stored { value, .. } => value,
        }
    }

    /// Returns true if the index write succeeded.
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced(_))
    }

    /// Returns the index failure, if any.
    pub fn index_error(&self) -> Option<&IndexError> {
        match self {
            Self::Synced(_) => None,
            Self::Stored { index_error, .. } => Some(index_error),
        }
    }

    /// Maps the carried value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SyncOutcome<U> {
        match self {
            Self::Synced(value) => SyncOutcome::Synced(f(value)),
            Self::Stored { value, index_error } => SyncOutcome::Stored {
                value: f(value),
                index_error,
            },
        }
    }
}
