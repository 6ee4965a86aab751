//! Search indexes.
//!
//! A search index is a derived, eventually-consistent view of the primary
//! store. It answers free-text queries and nothing else; callers must never
//! read a record's existence or field values from it.
//!
//! # Implementors
//!
//! - [`MemorySearchIndex`] - In-process full-text index over [`FtsIndex`]

mod fts;
mod memory;
mod query;

pub use fts::{FtsIndex, TokenizerConfig};
pub use memory::MemorySearchIndex;
pub use query::{Clause, Matcher, Occur, SearchQuery};

use crate::error::IndexResult;
use crate::record::Record;
use crate::types::RecordId;
use async_trait::async_trait;
use std::sync::Arc;

/// Full-text search over one record type.
#[async_trait]
pub trait SearchIndex<R: Record>: Send + Sync {
    /// Creates or replaces the document for `record`.
    ///
    /// `record` must carry an id.
    async fn upsert(&self, record: &R) -> IndexResult<()>;

    /// Removes the document with this id. Unknown ids are not an error.
    async fn delete_by_id(&self, id: RecordId) -> IndexResult<()>;

    /// Runs a query string and returns the matching documents, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IndexError::MalformedQuery`] if the query string does
    /// not parse.
    async fn query(&self, query: &str) -> IndexResult<Vec<R>>;
}

#[async_trait]
impl<R, T> SearchIndex<R> for Arc<T>
where
    R: Record,
    T: SearchIndex<R> + ?Sized,
{
    async fn upsert(&self, record: &R) -> IndexResult<()> {
        (**self).upsert(record).await
    }

    async fn delete_by_id(&self, id: RecordId) -> IndexResult<()> {
        (**self).delete_by_id(id).await
    }

    async fn query(&self, query: &str) -> IndexResult<Vec<R>> {
        (**self).query(query).await
    }
}
