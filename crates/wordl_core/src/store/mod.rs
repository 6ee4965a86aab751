//! Primary record stores.
//!
//! The primary store is the single source of truth for record existence
//! and field values. Every store:
//! - assigns ids on insert and never reuses them
//! - replaces whole records (no partial patches)
//! - treats deletes of unknown ids as no-ops
//!
//! # Implementors
//!
//! - [`MemoryRecordStore`] - For tests and ephemeral servers
//! - [`SqliteRecordStore`] - Relational storage via SQLite

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use crate::error::StoreResult;
use crate::record::Record;
use crate::types::RecordId;
use async_trait::async_trait;
use std::sync::Arc;

/// Authoritative CRUD storage for one record type.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Persists a new record and returns it with its assigned id.
    ///
    /// Any id already present on `record` is overwritten.
    async fn insert(&self, record: R) -> StoreResult<R>;

    /// Replaces every field of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::NotFound`] if no record has this id, and
    /// [`crate::StoreError::InvalidRecord`] if `record` carries no id.
    async fn replace(&self, record: R) -> StoreResult<R>;

    /// Looks up a record by id.
    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>>;

    /// Returns every record, ordered by id.
    async fn find_all(&self) -> StoreResult<Vec<R>>;

    /// Deletes a record. Returns whether it existed.
    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool>;

    /// Returns the number of stored records.
    async fn count(&self) -> StoreResult<usize> {
        Ok(self.find_all().await?.len())
    }
}

#[async_trait]
impl<R, T> RecordStore<R> for Arc<T>
where
    R: Record,
    T: RecordStore<R> + ?Sized,
{
    async fn insert(&self, record: R) -> StoreResult<R> {
        (**self).insert(record).await
    }

    async fn replace(&self, record: R) -> StoreResult<R> {
        (**self).replace(record).await
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> StoreResult<Vec<R>> {
        (**self).find_all().await
    }

    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool> {
        (**self).delete_by_id(id).await
    }

    async fn count(&self) -> StoreResult<usize> {
        (**self).count().await
    }
}
