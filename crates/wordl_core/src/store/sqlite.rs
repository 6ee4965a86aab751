//! SQLite-backed record store.
//!
//! Each record type owns one table:
//!
//! ```sql
//! CREATE TABLE <table> (
//!     id   INTEGER PRIMARY KEY AUTOINCREMENT,
//!     body TEXT NOT NULL
//! );
//! ```
//!
//! `body` holds the record as JSON, id included. `AUTOINCREMENT` keeps ids
//! from being reused after deletes.

use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::record::Record;
use crate::types::RecordId;
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

/// A record store persisting one record type into a SQLite table.
///
/// Several stores can share one connection, which is how a server keeps all
/// of its record types in a single database file.
pub struct SqliteRecordStore<R> {
    conn: Arc<Mutex<Connection>>,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> SqliteRecordStore<R> {
    /// Opens (or creates) a database file and ensures the table exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(Arc::new(Mutex::new(conn)))
    }

    /// Opens an existing database file without writing to it.
    ///
    /// The table is not created; use [`Self::table_exists`] before reading
    /// from a file that may predate this record type.
    pub fn open_read_only(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            _marker: PhantomData,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(Arc::new(Mutex::new(conn)))
    }

    /// Uses an existing shared connection and ensures the table exists.
    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> StoreResult<Self> {
        conn.lock().execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                body TEXT NOT NULL
            );",
            R::TABLE
        ))?;
        Ok(Self {
            conn,
            _marker: PhantomData,
        })
    }

    /// Returns true if the record type's table exists in the database.
    pub fn table_exists(&self) -> StoreResult<bool> {
        let found: Option<i64> = self
            .conn
            .lock()
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![R::TABLE],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Returns the shared connection handle.
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for SqliteRecordStore<R> {
    async fn insert(&self, mut record: R) -> StoreResult<R> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        // Row first to learn the id, then the body that carries it.
        tx.execute(
            &format!("INSERT INTO {} (body) VALUES (?1)", R::TABLE),
            params!["{}"],
        )?;
        let id = RecordId::new(tx.last_insert_rowid());
        record.set_id(id);

        let body = serde_json::to_string(&record)?;
        tx.execute(
            &format!("UPDATE {} SET body = ?1 WHERE id = ?2", R::TABLE),
            params![body, id.as_i64()],
        )?;
        tx.commit()?;

        Ok(record)
    }

    async fn replace(&self, record: R) -> StoreResult<R> {
        let id = record
            .id()
            .ok_or_else(|| StoreError::invalid_record("replace requires an id"))?;
        let body = serde_json::to_string(&record)?;

        let changed = self.conn.lock().execute(
            &format!("UPDATE {} SET body = ?1 WHERE id = ?2", R::TABLE),
            params![body, id.as_i64()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: R::COLLECTION,
                id,
            });
        }

        Ok(record)
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        let body: Option<String> = self
            .conn
            .lock()
            .query_row(
                &format!("SELECT body FROM {} WHERE id = ?1", R::TABLE),
                params![id.as_i64()],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> StoreResult<Vec<R>> {
        let bodies = {
            let conn = self.conn.lock();
            let mut stmt = conn.prepare(&format!("SELECT body FROM {} ORDER BY id", R::TABLE))?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }

    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool> {
        let changed = self.conn.lock().execute(
            &format!("DELETE FROM {} WHERE id = ?1", R::TABLE),
            params![id.as_i64()],
        )?;
        Ok(changed > 0)
    }

    async fn count(&self) -> StoreResult<usize> {
        let count: i64 = self.conn.lock().query_row(
            &format!("SELECT COUNT(*) FROM {}", R::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl<R: Record> std::fmt::Debug for SqliteRecordStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecordStore")
            .field("table", &R::TABLE)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CategoryWord, WordInfo, WordThumbInfo};
    use crate::types::RecordRef;
    use tempfile::TempDir;

    #[tokio::test]
    async fn insert_and_find() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let saved = store.insert(CategoryWord::new("animals", "cat")).await.unwrap();
        assert_eq!(saved.id, Some(RecordId::new(1)));

        let found = store.find_by_id(RecordId::new(1)).await.unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn find_missing_is_none() {
        let store = SqliteRecordStore::<CategoryWord>::open_in_memory().unwrap();
        assert!(store.find_by_id(RecordId::new(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replace_and_not_found() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let mut saved = store.insert(WordInfo::new("cat")).await.unwrap();
        saved.word = Some("dog".into());
        store.replace(saved.clone()).await.unwrap();
        assert_eq!(store.find_by_id(saved.id.unwrap()).await.unwrap(), Some(saved));

        let ghost = WordInfo::new("ghost").with_id(RecordId::new(77));
        assert!(matches!(
            store.replace(ghost).await,
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_ids_not_reused() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let a = store.insert(WordInfo::new("a")).await.unwrap();
        assert!(store.delete_by_id(a.id.unwrap()).await.unwrap());
        assert!(!store.delete_by_id(a.id.unwrap()).await.unwrap());

        let b = store.insert(WordInfo::new("b")).await.unwrap();
        assert_eq!(b.id, Some(RecordId::new(2)));
    }

    #[tokio::test]
    async fn find_all_ordered() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        for w in ["x", "y", "z"] {
            store.insert(WordInfo::new(w)).await.unwrap();
        }
        let words: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|r| r.word)
            .collect();
        assert_eq!(words, vec!["x", "y", "z"]);
    }

    #[tokio::test]
    async fn shared_connection_keeps_tables_apart() {
        let words = SqliteRecordStore::<WordInfo>::open_in_memory().unwrap();
        let thumbs = SqliteRecordStore::<WordThumbInfo>::with_connection(words.connection()).unwrap();

        let word = words.insert(WordInfo::new("cat")).await.unwrap();
        let thumb = thumbs
            .insert(WordThumbInfo {
                thumb_num: Some(1),
                word: word.id.map(RecordRef::new),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(thumb.id, Some(RecordId::new(1)));
        assert_eq!(words.count().await.unwrap(), 1);
        assert_eq!(thumbs.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordl.db");

        {
            let store = SqliteRecordStore::open(&path).unwrap();
            store.insert(CategoryWord::new("animals", "cat")).await.unwrap();
        }

        let store = SqliteRecordStore::<CategoryWord>::open(&path).unwrap();
        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].word.as_deref(), Some("cat"));
    }

    #[tokio::test]
    async fn read_only_open_creates_no_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordl.db");
        let words = SqliteRecordStore::<WordInfo>::open(&path).unwrap();
        words.insert(WordInfo::new("cat")).await.unwrap();

        let reader = SqliteRecordStore::<WordInfo>::open_read_only(&path).unwrap();
        assert!(reader.table_exists().unwrap());
        assert_eq!(reader.count().await.unwrap(), 1);
        assert!(reader.insert(WordInfo::new("dog")).await.is_err());

        let thumbs = SqliteRecordStore::<WordThumbInfo>::open_read_only(&path).unwrap();
        assert!(!thumbs.table_exists().unwrap());
    }

    #[test]
    fn read_only_open_of_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(SqliteRecordStore::<WordInfo>::open_read_only(dir.path().join("nope.db")).is_err());
        assert!(!dir.path().join("nope.db").exists());
    }
}
