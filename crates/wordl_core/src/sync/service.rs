//! The entity sync service.

use super::outcome::SyncOutcome;
use super::stats::SyncStats;
use crate::config::SyncConfig;
use crate::error::{IndexError, IndexResult, SyncError, SyncResult};
use crate::index::SearchIndex;
use crate::record::Record;
use crate::store::RecordStore;
use crate::types::RecordId;
use std::future::Future;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Keeps a primary store and a search index in step for one record type.
///
/// Ordering rule: the primary store write always completes before the index
/// write starts. A failed store write aborts the operation with no index
/// side effect. A failed or timed-out index write is logged, counted, and
/// returned as [`SyncOutcome::Stored`]; the caller still sees success.
///
/// Reads (`get`, `list`) consult only the primary store. `search` consults
/// only the index, and its failures propagate.
pub struct EntitySyncService<R, S, I> {
    store: S,
    index: I,
    config: SyncConfig,
    stats: SyncStats,
    _marker: PhantomData<fn() -> R>,
}

impl<R, S, I> EntitySyncService<R, S, I>
where
    R: Record,
    S: RecordStore<R>,
    I: SearchIndex<R>,
{
    /// Creates a service over the given adapters.
    pub fn new(store: S, index: I, config: SyncConfig) -> Self {
        Self {
            store,
            index,
            config,
            stats: SyncStats::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the primary store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the search index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the write-through counters.
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Persists a new record and mirrors it into the index.
    ///
    /// # Errors
    ///
    /// - [`SyncError::InvalidArgument`] if `record` already carries an id
    /// - [`SyncError::Store`] if the primary store rejects the write
    pub async fn create(&self, record: R) -> SyncResult<SyncOutcome<R>> {
        if record.id().is_some() {
            self.stats.record_failed_write();
            return Err(SyncError::invalid_argument("id must not be set"));
        }

        let saved = self.store_write(self.store.insert(record)).await?;
        debug!(collection = R::COLLECTION, id = ?saved.id(), "record created");
        Ok(self.mirror_upsert(saved).await)
    }

    /// Replaces an existing record and mirrors it into the index.
    ///
    /// # Errors
    ///
    /// - [`SyncError::InvalidArgument`] if `record` carries no id
    /// - [`SyncError::NotFound`] if no record has that id
    /// - [`SyncError::Store`] if the primary store rejects the write
    pub async fn update(&self, record: R) -> SyncResult<SyncOutcome<R>> {
        if record.id().is_none() {
            self.stats.record_failed_write();
            return Err(SyncError::invalid_argument("id must be set"));
        }

        let saved = self.store_write(self.store.replace(record)).await?;
        debug!(collection = R::COLLECTION, id = ?saved.id(), "record updated");
        Ok(self.mirror_upsert(saved).await)
    }

    /// Reads a record from the primary store.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] if no record has this id.
    pub async fn get(&self, id: RecordId) -> SyncResult<R> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(SyncError::NotFound {
                collection: R::COLLECTION,
                id,
            })
    }

    /// Reads every record from the primary store, ordered by id.
    pub async fn list(&self) -> SyncResult<Vec<R>> {
        Ok(self.store.find_all().await?)
    }

    /// Deletes a record and removes it from the index.
    ///
    /// Deleting an unknown id succeeds. The carried value reports whether a
    /// record existed.
    pub async fn delete(&self, id: RecordId) -> SyncResult<SyncOutcome<bool>> {
        let existed = self.store_write(self.store.delete_by_id(id)).await?;
        debug!(collection = R::COLLECTION, %id, existed, "record deleted");

        let result = self.bounded(self.index.delete_by_id(id)).await;
        Ok(self.settle(Some(id), existed, result))
    }

    /// Mirrors every stored record into the index.
    ///
    /// Used when a durable store is paired with an index that starts empty.
    /// Records the index rejects are logged and skipped; the return value is
    /// the number actually indexed. Write counters are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Store`] if the primary store cannot be read.
    pub async fn rebuild_index(&self) -> SyncResult<usize> {
        let records = self.store.find_all().await?;
        let total = records.len();
        let mut indexed = 0;

        for record in &records {
            match self.bounded(self.index.upsert(record)).await {
                Ok(()) => indexed += 1,
                Err(err) => warn!(
                    collection = R::COLLECTION,
                    id = ?record.id(),
                    error = %err,
                    "record skipped during index rebuild"
                ),
            }
        }

        info!(collection = R::COLLECTION, total, indexed, "index rebuilt");
        Ok(indexed)
    }

    /// Runs a query against the search index.
    ///
    /// Results are the indexed documents as last mirrored, which may lag the
    /// primary store.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Index`] if the index fails, times out, or cannot
    /// parse the query.
    pub async fn search(&self, query: &str) -> SyncResult<Vec<R>> {
        self.stats.record_search();
        match self.bounded(self.index.query(query)).await {
            Ok(hits) => {
                debug!(collection = R::COLLECTION, query, hits = hits.len(), "search served");
                Ok(hits)
            }
            Err(err) => {
                self.stats.record_failed_search();
                warn!(collection = R::COLLECTION, query, error = %err, "search failed");
                Err(err.into())
            }
        }
    }

    async fn store_write<T>(
        &self,
        write: impl Future<Output = crate::error::StoreResult<T>>,
    ) -> SyncResult<T> {
        write.await.map_err(|err| {
            self.stats.record_failed_write();
            SyncError::from(err)
        })
    }

    async fn mirror_upsert(&self, record: R) -> SyncOutcome<R> {
        let result = self.bounded(self.index.upsert(&record)).await;
        self.settle(record.id(), record, result)
    }

    /// Runs an index call under the configured timeout.
    async fn bounded<T>(&self, call: impl Future<Output = IndexResult<T>>) -> IndexResult<T> {
        match tokio::time::timeout(self.config.index_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(IndexError::Timeout(self.config.index_timeout)),
        }
    }

    fn settle<T>(&self, id: Option<RecordId>, value: T, result: IndexResult<()>) -> SyncOutcome<T> {
        match result {
            Ok(()) => {
                self.stats.record_synced_write();
                SyncOutcome::Synced(value)
            }
            Err(index_error) => {
                self.stats.record_unindexed_write();
                warn!(
                    collection = R::COLLECTION,
                    id = ?id,
                    error = %index_error,
                    "record stored but not indexed"
                );
                SyncOutcome::Stored { value, index_error }
            }
        }
    }
}

impl<R, S, I> std::fmt::Debug for EntitySyncService<R, S, I>
where
    R: Record,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitySyncService")
            .field("collection", &R::COLLECTION)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MemorySearchIndex;
    use crate::record::CategoryWord;
    use crate::error::StoreResult;
    use crate::store::MemoryRecordStore;
    use async_trait::async_trait;
    use std::time::Duration;

    type Service<I> = EntitySyncService<CategoryWord, MemoryRecordStore<CategoryWord>, I>;

    fn service() -> Service<MemorySearchIndex<CategoryWord>> {
        EntitySyncService::new(
            MemoryRecordStore::new(),
            MemorySearchIndex::new(),
            SyncConfig::default(),
        )
    }

    struct DownIndex;

    #[async_trait]
    impl SearchIndex<CategoryWord> for DownIndex {
        async fn upsert(&self, _: &CategoryWord) -> IndexResult<()> {
            Err(IndexError::unavailable("down"))
        }

        async fn delete_by_id(&self, _: RecordId) -> IndexResult<()> {
            Err(IndexError::unavailable("down"))
        }

        async fn query(&self, _: &str) -> IndexResult<Vec<CategoryWord>> {
            Err(IndexError::unavailable("down"))
        }
    }

    struct SlowIndex;

    #[async_trait]
    impl SearchIndex<CategoryWord> for SlowIndex {
        async fn upsert(&self, _: &CategoryWord) -> IndexResult<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }

        async fn delete_by_id(&self, _: RecordId) -> IndexResult<()> {
            Ok(())
        }

        async fn query(&self, _: &str) -> IndexResult<Vec<CategoryWord>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    /// Hands records back exactly as given, without assigning ids.
    struct IdlessStore;

    #[async_trait]
    impl RecordStore<CategoryWord> for IdlessStore {
        async fn insert(&self, record: CategoryWord) -> StoreResult<CategoryWord> {
            Ok(record)
        }

        async fn replace(&self, record: CategoryWord) -> StoreResult<CategoryWord> {
            Ok(record)
        }

        async fn find_by_id(&self, _: RecordId) -> StoreResult<Option<CategoryWord>> {
            Ok(None)
        }

        async fn find_all(&self) -> StoreResult<Vec<CategoryWord>> {
            Ok(vec![CategoryWord::new("animals", "cat")])
        }

        async fn delete_by_id(&self, _: RecordId) -> StoreResult<bool> {
            Ok(false)
        }

        async fn count(&self) -> StoreResult<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_indexes() {
        let svc = service();
        let outcome = svc.create(CategoryWord::new("animals", "cat")).await.unwrap();
        assert!(outcome.is_synced());
        let saved = outcome.into_value();
        assert_eq!(saved.id, Some(RecordId::new(1)));

        assert_eq!(svc.get(RecordId::new(1)).await.unwrap(), saved);
        assert_eq!(svc.search("cat").await.unwrap(), vec![saved]);
        assert_eq!(svc.stats().synced_writes(), 1);
    }

    #[tokio::test]
    async fn create_with_id_is_rejected() {
        let svc = service();
        let err = svc
            .create(CategoryWord::new("animals", "cat").with_id(RecordId::new(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidArgument { ref message } if message == "id must not be set"));
        assert_eq!(svc.list().await.unwrap().len(), 0);
        assert!(svc.index().is_empty());
    }

    #[tokio::test]
    async fn update_requires_id_and_existing_record() {
        let svc = service();
        let err = svc.update(CategoryWord::new("a", "b")).await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidArgument { ref message } if message == "id must be set"));

        let err = svc
            .update(CategoryWord::new("a", "b").with_id(RecordId::new(9)))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
        assert!(svc.list().await.unwrap().is_empty());
        assert!(svc.index().is_empty());
    }

    #[tokio::test]
    async fn update_reindexes() {
        let svc = service();
        let mut saved = svc
            .create(CategoryWord::new("animals", "cat"))
            .await
            .unwrap()
            .into_value();
        saved.word = Some("dog".into());
        svc.update(saved.clone()).await.unwrap();

        assert!(svc.search("cat").await.unwrap().is_empty());
        assert_eq!(svc.search("dog").await.unwrap(), vec![saved.clone()]);
        assert_eq!(svc.get(RecordId::new(1)).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let svc = service();
        svc.create(CategoryWord::new("animals", "cat")).await.unwrap();

        assert!(svc.delete(RecordId::new(1)).await.unwrap().into_value());
        assert!(!svc.delete(RecordId::new(1)).await.unwrap().into_value());
        assert!(matches!(
            svc.get(RecordId::new(1)).await,
            Err(SyncError::NotFound { .. })
        ));
        assert!(svc.search("cat").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn index_failure_does_not_fail_mutations() {
        let svc = EntitySyncService::new(MemoryRecordStore::new(), DownIndex, SyncConfig::default());

        let outcome = svc.create(CategoryWord::new("animals", "cat")).await.unwrap();
        assert!(matches!(outcome.index_error(), Some(IndexError::Unavailable(_))));
        let saved = outcome.into_value();
        assert_eq!(svc.get(saved.id.unwrap()).await.unwrap(), saved);

        let outcome = svc.update(saved.clone()).await.unwrap();
        assert!(!outcome.is_synced());

        let outcome = svc.delete(saved.id.unwrap()).await.unwrap();
        assert!(!outcome.is_synced());
        assert_eq!(svc.stats().unindexed_writes(), 3);
    }

    #[tokio::test]
    async fn index_failure_propagates_on_search() {
        let svc = EntitySyncService::new(MemoryRecordStore::new(), DownIndex, SyncConfig::default());
        let err = svc.search("cat").await.unwrap_err();
        assert!(matches!(err, SyncError::Index(IndexError::Unavailable(_))));
        assert!(err.is_server_error());
        assert_eq!(svc.stats().failed_searches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_index_times_out() {
        let config = SyncConfig::new().index_timeout(Duration::from_millis(50));
        let svc = EntitySyncService::new(MemoryRecordStore::new(), SlowIndex, config);

        let outcome = svc.create(CategoryWord::new("animals", "cat")).await.unwrap();
        assert!(matches!(outcome.index_error(), Some(IndexError::Timeout(_))));
        assert_eq!(svc.list().await.unwrap().len(), 1);

        let err = svc.search("cat").await.unwrap_err();
        assert!(matches!(err, SyncError::Index(IndexError::Timeout(_))));
    }

    #[tokio::test]
    async fn unindexable_record_is_reported() {
        let svc = EntitySyncService::new(IdlessStore, MemorySearchIndex::new(), SyncConfig::default());

        let outcome = svc.create(CategoryWord::new("animals", "cat")).await.unwrap();
        assert!(matches!(outcome.index_error(), Some(IndexError::InvalidDocument(_))));
        assert_eq!(svc.stats().synced_writes(), 0);
        assert_eq!(svc.stats().unindexed_writes(), 1);
        assert!(svc.index().is_empty());
    }

    #[tokio::test]
    async fn rebuild_index_mirrors_store() {
        let store = MemoryRecordStore::new();
        store.insert(CategoryWord::new("animals", "cat")).await.unwrap();
        store.insert(CategoryWord::new("animals", "dog")).await.unwrap();
        let svc = EntitySyncService::new(store, MemorySearchIndex::new(), SyncConfig::default());
        assert!(svc.search("cat").await.unwrap().is_empty());

        assert_eq!(svc.rebuild_index().await.unwrap(), 2);
        assert_eq!(svc.search("animals").await.unwrap().len(), 2);
        assert_eq!(svc.search("id:2").await.unwrap()[0].word.as_deref(), Some("dog"));
        assert_eq!(svc.stats().synced_writes(), 0);
    }

    #[tokio::test]
    async fn rebuild_index_skips_rejected_records() {
        let svc = EntitySyncService::new(IdlessStore, MemorySearchIndex::new(), SyncConfig::default());
        assert_eq!(svc.rebuild_index().await.unwrap(), 0);

        let svc = EntitySyncService::new(MemoryRecordStore::new(), DownIndex, SyncConfig::default());
        svc.store().insert(CategoryWord::new("animals", "cat")).await.unwrap();
        assert_eq!(svc.rebuild_index().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_query_is_client_error() {
        let svc = service();
        let err = svc.search("cat AND").await.unwrap_err();
        assert!(err.is_client_error());
    }
}
