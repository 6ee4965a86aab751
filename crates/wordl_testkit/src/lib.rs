//! # Wordl Testkit
//!
//! Test utilities for the wordl backend.
//!
//! This crate provides:
//! - Fixtures: sample records and ready-made services
//! - Fault-injecting store and index adapters
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wordl_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn index_outage_keeps_records() {
//!     let harness = FaultHarness::<CategoryWord>::new();
//!     harness.index.fail_writes(true);
//!     let saved = harness.service.create(cat()).await.unwrap();
//!     assert!(!saved.is_synced());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use wordl_core::{
        CategoryWord, Feedback, Record, RecordId, SyncError, SyncOutcome, UserThumbInfo,
        WordInfo, WordThumbInfo,
    };
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
