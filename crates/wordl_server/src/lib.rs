//! # Wordl Server
//!
//! HTTP admin API for the wordl backend.
//!
//! This crate provides:
//! - CRUD and search endpoints for every admin record type
//! - Client alert headers on mutations
//! - Storage selection (in-memory or SQLite) from configuration
//!
//! # Endpoints
//!
//! For each collection (`category-words`, `word-infos`, `word-thumb-infos`,
//! `user-thumb-infos`, `feedbacks`):
//!
//! | Method   | Path                              | Success |
//! |----------|-----------------------------------|---------|
//! | `POST`   | `/api/{collection}`               | 201     |
//! | `PUT`    | `/api/{collection}`               | 200     |
//! | `GET`    | `/api/{collection}`               | 200     |
//! | `GET`    | `/api/{collection}/{id}`          | 200     |
//! | `DELETE` | `/api/{collection}/{id}`          | 204     |
//! | `GET`    | `/api/_search/{collection}?query=`| 200     |
//!
//! Plus `GET /health`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod alert;
mod config;
mod error;
mod handler;
mod server;

pub use alert::Alerts;
pub use config::{ServerConfig, StorageMode};
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use handler::{ResourceState, SearchParams, SharedService};
pub use server::{build_router, resource_router, serve, serve_on, service, AppState};
