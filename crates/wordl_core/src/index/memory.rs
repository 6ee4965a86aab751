//! In-process search index.

use super::fts::{FtsIndex, TokenizerConfig};
use super::query::SearchQuery;
use super::SearchIndex;
use crate::error::{IndexError, IndexResult};
use crate::record::{Record, SearchField};
use crate::types::RecordId;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

struct Inner<R> {
    fts: FtsIndex,
    documents: BTreeMap<RecordId, R>,
}

/// A search index holding documents and postings in memory.
///
/// Documents are full record copies, so query results reflect whatever was
/// last mirrored here, which may lag the primary store.
pub struct MemorySearchIndex<R> {
    inner: RwLock<Inner<R>>,
}

impl<R: Record> MemorySearchIndex<R> {
    /// Creates an empty index with the default tokenizer.
    pub fn new() -> Self {
        Self::with_tokenizer(TokenizerConfig::default())
    }

    /// Creates an empty index with a custom tokenizer.
    pub fn with_tokenizer(tokenizer: TokenizerConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                fts: FtsIndex::new(tokenizer),
                documents: BTreeMap::new(),
            }),
        }
    }

    /// Returns the number of indexed documents.
    pub fn len(&self) -> usize {
        self.inner.read().documents.len()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.inner.read().documents.is_empty()
    }

    /// Returns the indexed copy of a document.
    pub fn document(&self, id: RecordId) -> Option<R> {
        self.inner.read().documents.get(&id).cloned()
    }

    /// Drops every document.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.fts.clear();
        inner.documents.clear();
    }
}

impl<R: Record> Default for MemorySearchIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> SearchIndex<R> for MemorySearchIndex<R> {
    async fn upsert(&self, record: &R) -> IndexResult<()> {
        let id = record
            .id()
            .ok_or_else(|| IndexError::invalid_document("cannot index a record without an id"))?;

        let mut fields = record.search_fields();
        fields.push(SearchField::new("id", id.to_string()));

        let mut inner = self.inner.write();
        inner.fts.index_fields(id, &fields);
        inner.documents.insert(id, record.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: RecordId) -> IndexResult<()> {
        let mut inner = self.inner.write();
        inner.fts.remove(id);
        inner.documents.remove(&id);
        Ok(())
    }

    async fn query(&self, query: &str) -> IndexResult<Vec<R>> {
        let inner = self.inner.read();
        let parsed = SearchQuery::parse(query, inner.fts.tokenizer())?;

        let mut ids: Vec<_> = parsed.evaluate(&inner.fts).into_iter().collect();
        ids.sort_unstable();

        Ok(ids
            .into_iter()
            .filter_map(|id| inner.documents.get(&id).cloned())
            .collect())
    }
}

impl<R> std::fmt::Debug for MemorySearchIndex<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySearchIndex")
            .field("fts", &self.inner.read().fts)
            .finish()
    }
}
