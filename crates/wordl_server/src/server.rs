//! Router assembly and the server entry point.

use crate::alert::Alerts;
use crate::config::{ServerConfig, StorageMode};
use crate::error::ServerResult;
use crate::handler::{self, ResourceState, SharedService};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use wordl_core::{
    CategoryWord, EntitySyncService, Feedback, MemoryRecordStore, MemorySearchIndex, Record,
    RecordStore, SearchIndex, SqliteRecordStore, SyncConfig, UserThumbInfo, WordInfo,
    WordThumbInfo,
};

/// One sync service per record type, plus the alert header builder.
#[derive(Clone)]
pub struct AppState {
    /// Category words.
    pub category_words: Arc<SharedService<CategoryWord>>,
    /// Word infos.
    pub word_infos: Arc<SharedService<WordInfo>>,
    /// Word thumbnails.
    pub word_thumb_infos: Arc<SharedService<WordThumbInfo>>,
    /// User thumbnails.
    pub user_thumb_infos: Arc<SharedService<UserThumbInfo>>,
    /// Feedback.
    pub feedbacks: Arc<SharedService<Feedback>>,
    /// Alert header builder.
    pub alerts: Alerts,
}

impl AppState {
    /// Builds every service from the configuration.
    ///
    /// Sqlite storage opens the file once and shares the connection between
    /// all record types. Search indexes are always in memory, so with SQLite
    /// each one is filled from its table before the state is returned.
    pub async fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let state = Self::open(config)?;
        if matches!(config.storage, StorageMode::Sqlite(_)) {
            state.rebuild_indexes().await?;
        }
        Ok(state)
    }

    /// Loads every stored record into its search index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ServerError::Rebuild`] if a store cannot be read.
    pub async fn rebuild_indexes(&self) -> ServerResult<()> {
        self.category_words.rebuild_index().await?;
        self.word_infos.rebuild_index().await?;
        self.word_thumb_infos.rebuild_index().await?;
        self.user_thumb_infos.rebuild_index().await?;
        self.feedbacks.rebuild_index().await?;
        Ok(())
    }

    fn open(config: &ServerConfig) -> ServerResult<Self> {
        let alerts = Alerts::new(&config.application_name)?;
        let sync = &config.sync;

        match &config.storage {
            StorageMode::Memory => Ok(Self {
                category_words: memory_service(sync),
                word_infos: memory_service(sync),
                word_thumb_infos: memory_service(sync),
                user_thumb_infos: memory_service(sync),
                feedbacks: memory_service(sync),
                alerts,
            }),
            StorageMode::Sqlite(path) => {
                let first = SqliteRecordStore::<CategoryWord>::open(path)?;
                let conn = first.connection();
                Ok(Self {
                    category_words: service(Arc::new(first), memory_index(), sync),
                    word_infos: service(
                        Arc::new(SqliteRecordStore::<WordInfo>::with_connection(Arc::clone(&conn))?),
                        memory_index(),
                        sync,
                    ),
                    word_thumb_infos: service(
                        Arc::new(SqliteRecordStore::<WordThumbInfo>::with_connection(Arc::clone(&conn))?),
                        memory_index(),
                        sync,
                    ),
                    user_thumb_infos: service(
                        Arc::new(SqliteRecordStore::<UserThumbInfo>::with_connection(Arc::clone(&conn))?),
                        memory_index(),
                        sync,
                    ),
                    feedbacks: service(
                        Arc::new(SqliteRecordStore::<Feedback>::with_connection(conn)?),
                        memory_index(),
                        sync,
                    ),
                    alerts,
                })
            }
        }
    }

    fn resource<R: Record>(&self, service: &Arc<SharedService<R>>) -> ResourceState<R> {
        ResourceState {
            service: Arc::clone(service),
            alerts: self.alerts.clone(),
        }
    }
}

/// Wraps adapters into a shared service.
pub fn service<R: Record>(
    store: Arc<dyn RecordStore<R>>,
    index: Arc<dyn SearchIndex<R>>,
    config: &SyncConfig,
) -> Arc<SharedService<R>> {
    Arc::new(EntitySyncService::new(store, index, config.clone()))
}

fn memory_index<R: Record>() -> Arc<dyn SearchIndex<R>> {
    Arc::new(MemorySearchIndex::<R>::new())
}

fn memory_service<R: Record>(config: &SyncConfig) -> Arc<SharedService<R>> {
    service(Arc::new(MemoryRecordStore::<R>::new()), memory_index(), config)
}

/// Routes for one record type.
pub fn resource_router<R: Record>(state: ResourceState<R>) -> Router {
    Router::new()
        .route(
            &format!("/api/{}", R::COLLECTION),
            get(handler::list::<R>)
                .post(handler::create::<R>)
                .put(handler::update::<R>),
        )
        .route(
            &format!("/api/{}/{{id}}", R::COLLECTION),
            get(handler::get::<R>).delete(handler::delete::<R>),
        )
        .route(
            &format!("/api/_search/{}", R::COLLECTION),
            get(handler::search::<R>),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full admin API router.
pub fn build_router(state: &AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(resource_router(state.resource(&state.category_words)))
        .merge(resource_router(state.resource(&state.word_infos)))
        .merge(resource_router(state.resource(&state.word_thumb_infos)))
        .merge(resource_router(state.resource(&state.user_thumb_infos)))
        .merge(resource_router(state.resource(&state.feedbacks)))
}

/// Serves the admin API on an already-bound listener until it fails.
pub async fn serve_on(listener: TcpListener, state: &AppState) -> ServerResult<()> {
    let router = build_router(state);
    info!(addr = ?listener.local_addr().ok(), "admin API listening");
    axum::serve(listener, router).await?;
    Ok(())
}

/// Binds the configured address and serves the admin API.
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let state = AppState::from_config(&config).await?;
    info!(storage = ?config.storage, "stores ready");
    let listener = TcpListener::bind(config.bind_addr).await?;
    serve_on(listener, &state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn memory_state_starts_empty() {
        let state = AppState::from_config(&ServerConfig::default()).await.unwrap();
        assert!(state.category_words.list().await.unwrap().is_empty());
        assert!(state.feedbacks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sqlite_state_shares_one_file() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::default().with_sqlite(dir.path().join("wordl.db"));
        let state = AppState::from_config(&config).await.unwrap();

        state
            .word_infos
            .create(WordInfo::new("cat"))
            .await
            .unwrap();
        state
            .category_words
            .create(CategoryWord::new("animals", "cat"))
            .await
            .unwrap();

        let reopened = AppState::from_config(&config).await.unwrap();
        assert_eq!(reopened.word_infos.list().await.unwrap().len(), 1);
        assert_eq!(reopened.category_words.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sqlite_state_reindexes_on_open() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::default().with_sqlite(dir.path().join("wordl.db"));

        let state = AppState::from_config(&config).await.unwrap();
        let saved = state
            .category_words
            .create(CategoryWord::new("animals", "cat"))
            .await
            .unwrap();
        assert!(saved.is_synced());
        drop(state);

        let reopened = AppState::from_config(&config).await.unwrap();
        let hits = reopened.category_words.search("cat").await.unwrap();
        assert_eq!(hits, vec![saved.into_value()]);
        assert!(reopened.word_infos.search("*").await.unwrap().is_empty());
    }
}
