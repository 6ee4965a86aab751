//! Fault-injecting adapters.
//!
//! [`FaultyStore`] and [`FlakyIndex`] wrap the in-memory adapters and fail
//! or stall on demand. Both write to a shared [`CallLog`], so tests can
//! assert the order in which the sync service touched each store.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wordl_core::{
    EntitySyncService, IndexError, IndexResult, MemoryRecordStore, MemorySearchIndex, Record,
    RecordId, RecordStore, SearchIndex, StoreError, StoreResult, SyncConfig,
};

/// An adapter call, as seen by the fault adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    /// `RecordStore::insert`
    StoreInsert,
    /// `RecordStore::replace`
    StoreReplace,
    /// `RecordStore::find_by_id` or `find_all`
    StoreRead,
    /// `RecordStore::delete_by_id`
    StoreDelete,
    /// `SearchIndex::upsert`
    IndexUpsert,
    /// `SearchIndex::delete_by_id`
    IndexDelete,
    /// `SearchIndex::query`
    IndexQuery,
}

impl Call {
    /// Returns true for index calls.
    pub fn is_index(self) -> bool {
        matches!(self, Call::IndexUpsert | Call::IndexDelete | Call::IndexQuery)
    }
}

/// Shared, ordered record of adapter calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    /// Returns every call so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Returns only the index calls.
    pub fn index_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.is_index()).collect()
    }

    /// Forgets every recorded call.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

/// A memory store that fails every call while switched off.
pub struct FaultyStore<R> {
    inner: MemoryRecordStore<R>,
    failing: AtomicBool,
    log: CallLog,
}

impl<R: Record> FaultyStore<R> {
    /// Creates a healthy store writing to `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: MemoryRecordStore::new(),
            failing: AtomicBool::new(false),
            log,
        }
    }

    /// Makes every following call fail (or succeed again).
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the wrapped store, bypassing faults and logging.
    pub fn inner(&self) -> &MemoryRecordStore<R> {
        &self.inner
    }

    fn check(&self, call: Call) -> StoreResult<()> {
        self.log.record(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::unavailable("injected store fault"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for FaultyStore<R> {
    async fn insert(&self, record: R) -> StoreResult<R> {
        self.check(Call::StoreInsert)?;
        self.inner.insert(record).await
    }

    async fn replace(&self, record: R) -> StoreResult<R> {
        self.check(Call::StoreReplace)?;
        self.inner.replace(record).await
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        self.check(Call::StoreRead)?;
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> StoreResult<Vec<R>> {
        self.check(Call::StoreRead)?;
        self.inner.find_all().await
    }

    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool> {
        self.check(Call::StoreDelete)?;
        self.inner.delete_by_id(id).await
    }
}

/// A memory index that can fail writes, fail queries, or stall.
pub struct FlakyIndex<R> {
    inner: MemorySearchIndex<R>,
    fail_writes: AtomicBool,
    fail_queries: AtomicBool,
    delay: Mutex<Option<Duration>>,
    log: CallLog,
}

impl<R: Record> FlakyIndex<R> {
    /// Creates a healthy index writing to `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: MemorySearchIndex::new(),
            fail_writes: AtomicBool::new(false),
            fail_queries: AtomicBool::new(false),
            delay: Mutex::new(None),
            log,
        }
    }

    /// Makes upserts and deletes fail.
    pub fn fail_writes(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Makes queries fail.
    pub fn fail_queries(&self, failing: bool) {
        self.fail_queries.store(failing, Ordering::SeqCst);
    }

    /// Stalls every call by `delay` before doing anything else.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    /// Returns the wrapped index, bypassing faults and logging.
    pub fn inner(&self) -> &MemorySearchIndex<R> {
        &self.inner
    }

    async fn enter(&self, call: Call, flag: &AtomicBool) -> IndexResult<()> {
        self.log.record(call);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if flag.load(Ordering::SeqCst) {
            Err(IndexError::unavailable("injected index fault"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<R: Record> SearchIndex<R> for FlakyIndex<R> {
    async fn upsert(&self, record: &R) -> IndexResult<()> {
        self.enter(Call::IndexUpsert, &self.fail_writes).await?;
        self.inner.upsert(record).await
    }

    async fn delete_by_id(&self, id: RecordId) -> IndexResult<()> {
        self.enter(Call::IndexDelete, &self.fail_writes).await?;
        self.inner.delete_by_id(id).await
    }

    async fn query(&self, query: &str) -> IndexResult<Vec<R>> {
        self.enter(Call::IndexQuery, &self.fail_queries).await?;
        self.inner.query(query).await
    }
}

/// A sync service over fault adapters.
pub type FaultyService<R> = EntitySyncService<R, Arc<FaultyStore<R>>, Arc<FlakyIndex<R>>>;

/// A sync service wired to fault adapters, with handles to each.
pub struct FaultHarness<R: Record> {
    /// The service under test.
    pub service: FaultyService<R>,
    /// Handle to the primary store.
    pub store: Arc<FaultyStore<R>>,
    /// Handle to the search index.
    pub index: Arc<FlakyIndex<R>>,
    /// Calls made by the service, in order.
    pub log: CallLog,
}

impl<R: Record> FaultHarness<R> {
    /// Creates a healthy harness with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SyncConfig::default())
    }

    /// Creates a healthy harness.
    pub fn with_config(config: SyncConfig) -> Self {
        let log = CallLog::new();
        let store = Arc::new(FaultyStore::new(log.clone()));
        let index = Arc::new(FlakyIndex::new(log.clone()));
        let service = EntitySyncService::new(Arc::clone(&store), Arc::clone(&index), config);
        Self {
            service,
            store,
            index,
            log,
        }
    }
}

impl<R: Record> Default for FaultHarness<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordl_core::CategoryWord;

    #[tokio::test]
    async fn faulty_store_logs_and_fails() {
        let log = CallLog::new();
        let store = FaultyStore::<CategoryWord>::new(log.clone());
        store.fail(true);
        assert!(store.insert(CategoryWord::new("a", "b")).await.is_err());
        store.fail(false);
        assert!(store.insert(CategoryWord::new("a", "b")).await.is_ok());
        assert_eq!(log.calls(), vec![Call::StoreInsert, Call::StoreInsert]);
        assert_eq!(store.inner().len(), 1);
    }

    #[tokio::test]
    async fn flaky_index_fails_independently() {
        let index = FlakyIndex::<CategoryWord>::new(CallLog::new());
        let record = CategoryWord::new("animals", "cat").with_id(RecordId::new(1));

        index.fail_writes(true);
        assert!(index.upsert(&record).await.is_err());
        assert!(index.inner().is_empty());
        assert!(index.query("cat").await.unwrap().is_empty());

        index.fail_writes(false);
        index.fail_queries(true);
        index.upsert(&record).await.unwrap();
        assert!(index.query("cat").await.is_err());
    }
}
