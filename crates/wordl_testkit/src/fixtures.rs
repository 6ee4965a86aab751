//! Test fixtures and service helpers.

use std::path::PathBuf;
use tempfile::TempDir;
use wordl_core::{
    CategoryWord, EntitySyncService, Feedback, MemoryRecordStore, MemorySearchIndex, Record,
    RecordId, RecordRef, SqliteRecordStore, SyncConfig, UserThumbInfo, WordInfo, WordThumbInfo,
};

/// A sync service over the in-memory adapters.
pub type MemoryService<R> = EntitySyncService<R, MemoryRecordStore<R>, MemorySearchIndex<R>>;

/// A sync service over a SQLite store and an in-memory index.
pub type SqliteService<R> = EntitySyncService<R, SqliteRecordStore<R>, MemorySearchIndex<R>>;

/// Creates a service over fresh in-memory adapters.
pub fn memory_service<R: Record>() -> MemoryService<R> {
    EntitySyncService::new(
        MemoryRecordStore::new(),
        MemorySearchIndex::new(),
        SyncConfig::default(),
    )
}

/// A SQLite database file in a temporary directory.
pub struct TestSqlite {
    /// Database file path.
    pub path: PathBuf,
    /// Kept alive to prevent cleanup.
    _temp_dir: TempDir,
}

impl TestSqlite {
    /// Creates an empty database location.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self {
            path: temp_dir.path().join("wordl.db"),
            _temp_dir: temp_dir,
        }
    }

    /// Opens a service over this file with a fresh in-memory index.
    pub fn service<R: Record>(&self) -> SqliteService<R> {
        EntitySyncService::new(
            SqliteRecordStore::open(&self.path).expect("Failed to open sqlite store"),
            MemorySearchIndex::new(),
            SyncConfig::default(),
        )
    }
}

impl Default for TestSqlite {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical `animals` / `cat` category word.
pub fn cat() -> CategoryWord {
    CategoryWord::new("animals", "cat")
}

/// An unsaved word info.
pub fn word_info(word: &str) -> WordInfo {
    WordInfo::new(word)
}

/// A word thumbnail pointing at a word info.
pub fn word_thumb_info(word: RecordId, thumb_num: i32) -> WordThumbInfo {
    WordThumbInfo {
        thumb_num: Some(thumb_num),
        pic_url: Some(format!("https://img.example/{}/{thumb_num}.png", word)),
        thumb_lid: Some(format!("lid-{thumb_num}")),
        word: Some(RecordRef::new(word)),
        ..Default::default()
    }
}

/// A user thumbnail clicked by a user.
pub fn user_thumb_info(word: &str, clicker: RecordId) -> UserThumbInfo {
    UserThumbInfo {
        word: Some(word.to_string()),
        self_num: Some(1),
        thumb_num: Some(1),
        clicker: Some(RecordRef::new(clicker)),
        ..Default::default()
    }
}

/// A feedback entry.
pub fn feedback(kind: &str, content: &str) -> Feedback {
    Feedback {
        kind: Some(kind.to_string()),
        content: Some(content.to_string()),
        phone: Some("555-0100".to_string()),
        ..Default::default()
    }
}
