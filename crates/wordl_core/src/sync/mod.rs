//! Write-through synchronization between the primary store and the search
//! index.
//!
//! The [`EntitySyncService`] is the only component that writes to both
//! stores. Every mutation hits the primary store first; the index write
//! follows and is best-effort.

mod outcome;
mod service;
mod stats;

pub use outcome::SyncOutcome;
pub use service::EntitySyncService;
pub use stats::{StatsSnapshot, SyncStats};
