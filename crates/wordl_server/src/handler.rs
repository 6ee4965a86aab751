//! Request handlers for the resource endpoints.
//!
//! Handlers are generic over the record type; each resource router
//! instantiates them with its own [`ResourceState`].

use crate::alert::Alerts;
use crate::error::{ApiError, ApiResult};
use axum::extract::{Path, Query, State};
use axum::http::header::{HeaderValue, LOCATION};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use wordl_core::{
    EntitySyncService, Record, RecordId, RecordStore, SearchIndex, SyncError,
};

/// A sync service over type-erased adapters.
pub type SharedService<R> =
    EntitySyncService<R, Arc<dyn RecordStore<R>>, Arc<dyn SearchIndex<R>>>;

/// State handed to one resource's handlers.
pub struct ResourceState<R: Record> {
    /// Sync service for the record type.
    pub service: Arc<SharedService<R>>,
    /// Alert header builder.
    pub alerts: Alerts,
}

impl<R: Record> Clone for ResourceState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            alerts: self.alerts.clone(),
        }
    }
}

impl<R: Record> ResourceState<R> {
    fn rejected(&self, err: SyncError, error_key: &str) -> ApiError {
        match err {
            SyncError::InvalidArgument { message } => ApiError::Rejected {
                message,
                headers: self.alerts.failure(R::ENTITY_NAME, error_key),
            },
            other => ApiError::Sync(other),
        }
    }
}

/// Query parameters of the search endpoint.
///
/// `query` is required; a request without it is rejected with 400 before
/// the handler runs.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Query string.
    pub query: String,
}

/// `POST /api/{collection}`
pub async fn create<R: Record>(
    State(state): State<ResourceState<R>>,
    Json(record): Json<R>,
) -> ApiResult<impl IntoResponse> {
    debug!(entity = R::ENTITY_NAME, "REST request to save");

    let saved = state
        .service
        .create(record)
        .await
        .map_err(|err| state.rejected(err, "idexists"))?
        .into_value();
    let id = saved.id().map(|id| id.to_string()).unwrap_or_default();

    let mut headers = state.alerts.created(R::ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/{}/{id}", R::COLLECTION)) {
        headers.insert(LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(saved)))
}

/// `PUT /api/{collection}`
pub async fn update<R: Record>(
    State(state): State<ResourceState<R>>,
    Json(record): Json<R>,
) -> ApiResult<impl IntoResponse> {
    debug!(entity = R::ENTITY_NAME, id = ?record.id(), "REST request to update");

    let saved = state
        .service
        .update(record)
        .await
        .map_err(|err| state.rejected(err, "idnull"))?
        .into_value();
    let id = saved.id().map(|id| id.to_string()).unwrap_or_default();

    Ok((
        StatusCode::OK,
        state.alerts.updated(R::ENTITY_NAME, &id),
        Json(saved),
    ))
}

/// `GET /api/{collection}`
pub async fn list<R: Record>(State(state): State<ResourceState<R>>) -> ApiResult<Json<Vec<R>>> {
    debug!(entity = R::ENTITY_NAME, "REST request to get all");
    Ok(Json(state.service.list().await?))
}

/// `GET /api/{collection}/{id}`
pub async fn get<R: Record>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<R>> {
    debug!(entity = R::ENTITY_NAME, id, "REST request to get");
    Ok(Json(state.service.get(RecordId::new(id)).await?))
}

/// `DELETE /api/{collection}/{id}`
pub async fn delete<R: Record>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    debug!(entity = R::ENTITY_NAME, id, "REST request to delete");
    state.service.delete(RecordId::new(id)).await?;

    Ok((
        StatusCode::NO_CONTENT,
        state.alerts.deleted(R::ENTITY_NAME, &id.to_string()),
    ))
}

/// `GET /api/_search/{collection}?query=...`
pub async fn search<R: Record>(
    State(state): State<ResourceState<R>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<R>>> {
    debug!(entity = R::ENTITY_NAME, query = %params.query, "REST request to search");
    Ok(Json(state.service.search(&params.query).await?))
}
