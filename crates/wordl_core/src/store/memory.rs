//! In-memory record store.

use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::record::Record;
use crate::types::RecordId;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// A record store kept entirely in memory.
///
/// Suitable for:
/// - Unit and integration tests
/// - Ephemeral servers that don't need persistence
///
/// Ids start at 1 and increase monotonically; deleted ids are not reused.
///
/// # Example
///
/// ```rust
/// use wordl_core::{CategoryWord, MemoryRecordStore};
///
/// let store = MemoryRecordStore::<CategoryWord>::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug)]
pub struct MemoryRecordStore<R> {
    records: RwLock<BTreeMap<RecordId, R>>,
    next_id: AtomicI64,
}

impl<R> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<R> MemoryRecordStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryRecordStore<R> {
    async fn insert(&self, mut record: R) -> StoreResult<R> {
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        record.set_id(id);
        self.records.write().insert(id, record.clone());
        Ok(record)
    }

    async fn replace(&self, record: R) -> StoreResult<R> {
        let id = record
            .id()
            .ok_or_else(|| StoreError::invalid_record("replace requires an id"))?;
        let mut records = self.records.write();
        match records.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(StoreError::NotFound {
                collection: R::COLLECTION,
                id,
            }),
        }
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        Ok(self.records.read().get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<R>> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool> {
        Ok(self.records.write().remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CategoryWord;

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = MemoryRecordStore::new();
        let a = store.insert(CategoryWord::new("animals", "cat")).await.unwrap();
        let b = store.insert(CategoryWord::new("animals", "dog")).await.unwrap();
        assert_eq!(a.id, Some(RecordId::new(1)));
        assert_eq!(b.id, Some(RecordId::new(2)));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn insert_overwrites_supplied_id() {
        let store = MemoryRecordStore::new();
        let record = CategoryWord::new("animals", "cat").with_id(RecordId::new(99));
        let saved = store.insert(record).await.unwrap();
        assert_eq!(saved.id, Some(RecordId::new(1)));
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = MemoryRecordStore::new();
        let a = store.insert(CategoryWord::new("a", "b")).await.unwrap();
        assert!(store.delete_by_id(a.id.unwrap()).await.unwrap());
        let b = store.insert(CategoryWord::new("a", "b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn replace_existing() {
        let store = MemoryRecordStore::new();
        let saved = store.insert(CategoryWord::new("animals", "cat")).await.unwrap();

        let mut changed = saved.clone();
        changed.word = Some("lion".into());
        changed.category = None;
        store.replace(changed).await.unwrap();

        let found = store.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.word.as_deref(), Some("lion"));
        // Full replace, not a patch
        assert_eq!(found.category, None);
    }

    #[tokio::test]
    async fn replace_unknown_is_not_found_and_creates_nothing() {
        let store = MemoryRecordStore::<CategoryWord>::new();
        let record = CategoryWord::new("a", "b").with_id(RecordId::new(5));
        let result = store.replace(record).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn replace_without_id_is_rejected() {
        let store = MemoryRecordStore::<CategoryWord>::new();
        let result = store.replace(CategoryWord::new("a", "b")).await;
        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryRecordStore::new();
        let saved = store.insert(CategoryWord::new("a", "b")).await.unwrap();
        let id = saved.id.unwrap();
        assert!(store.delete_by_id(id).await.unwrap());
        assert!(!store.delete_by_id(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let store = MemoryRecordStore::new();
        for word in ["c", "a", "b"] {
            store.insert(CategoryWord::new("x", word)).await.unwrap();
        }
        let all = store.find_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.unwrap().as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
