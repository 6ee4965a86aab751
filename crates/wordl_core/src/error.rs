//! Error types for wordl core.

use crate::types::RecordId;
use std::time::Duration;
use thiserror::Error;

/// Result type for primary store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for search index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Result type for sync service operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised by a primary record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record to replace does not exist.
    #[error("record {id} not found in {collection}")]
    NotFound {
        /// Collection searched.
        collection: &'static str,
        /// Missing record id.
        id: RecordId,
    },

    /// SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record cannot be written as given.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The store cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates an invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Errors raised by a search index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index cannot serve requests.
    #[error("index unavailable: {0}")]
    Unavailable(String),

    /// The query string could not be parsed.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// The document cannot be indexed as given.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The index did not answer in time.
    #[error("index operation timed out after {0:?}")]
    Timeout(Duration),
}

impl IndexError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a malformed query error.
    pub fn malformed_query(message: impl Into<String>) -> Self {
        Self::MalformedQuery(message.into())
    }

    /// Creates an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }
}

/// Errors surfaced by the entity sync service.
///
/// Index failures on a mutating path never show up here; they are reported
/// through [`crate::SyncOutcome::Stored`] instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The caller violated a precondition.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the request.
        message: String,
    },

    /// No record with the requested id exists in the primary store.
    #[error("record {id} not found in {collection}")]
    NotFound {
        /// Collection searched.
        collection: &'static str,
        /// Missing record id.
        id: RecordId,
    },

    /// The primary store failed.
    #[error("store failure: {0}")]
    Store(StoreError),

    /// The search index failed while serving a query.
    #[error("index failure: {0}")]
    Index(#[from] IndexError),
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Store(other),
        }
    }
}

impl SyncError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns true if the caller is at fault (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidArgument { .. }
                | SyncError::NotFound { .. }
                | SyncError::Index(IndexError::MalformedQuery(_) | IndexError::InvalidDocument(_))
        )
    }

    /// Returns true if a backing store is at fault (5xx).
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}
