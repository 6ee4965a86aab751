//! # Wordl Core
//!
//! Write-through persistence for the wordl admin backend.
//!
//! This crate provides:
//! - Record types for the admin collections
//! - Primary record stores (in-memory and SQLite)
//! - A field-aware full-text search index with query-string translation
//! - The entity sync service that keeps store and index in step
//!
//! ## Architecture
//!
//! Every record type lives in two places:
//! 1. The **primary store**, the source of truth for existence and fields
//! 2. The **search index**, a derived view used only for free-text search
//!
//! ## Key Invariants
//!
//! - The primary store is written before the index, on every mutation
//! - A store failure aborts the mutation; the index is left untouched
//! - An index failure never fails a mutation that the store accepted
//! - Reads by id or listing never consult the index
//! - Search results come only from the index and may lag the store

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod config;
mod error;
pub mod index;
pub mod record;
pub mod store;
mod sync;
mod types;

pub use config::SyncConfig;
pub use error::{IndexError, IndexResult, StoreError, StoreResult, SyncError, SyncResult};
pub use index::{FtsIndex, MemorySearchIndex, SearchIndex, SearchQuery, TokenizerConfig};
pub use record::{CategoryWord, Feedback, Record, SearchField, UserThumbInfo, WordInfo, WordThumbInfo};
pub use store::{MemoryRecordStore, RecordStore, SqliteRecordStore};
pub use sync::{EntitySyncService, StatsSnapshot, SyncOutcome, SyncStats};
pub use types::{RecordId, RecordRef};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
