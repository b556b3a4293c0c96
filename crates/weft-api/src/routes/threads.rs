use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{error::ApiResult, state::AppState};
use weft_types::{Page, SortOrder, Thread, ThreadItem};

const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ListThreadsQuery {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "newest_first")]
    pub order: SortOrder,
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "chronological")]
    pub order: SortOrder,
}

fn default_limit() -> usize {
    20
}

fn newest_first() -> SortOrder {
    SortOrder::Desc
}

fn chronological() -> SortOrder {
    SortOrder::Asc
}

/// List threads, newest first by default.
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListThreadsQuery>,
) -> ApiResult<Json<Page<Thread>>> {
    let limit = query.limit.min(MAX_PAGE_SIZE);
    let page = state
        .store
        .list_threads(query.after.as_deref(), limit, query.order)
        .await?;
    Ok(Json(page))
}

/// Get a specific thread by ID.
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<Thread>> {
    let thread = state.store.load_thread(&thread_id).await?;
    Ok(Json(thread))
}

/// List a thread's items in insertion order.
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    Query(query): Query<ListItemsQuery>,
) -> ApiResult<Json<Page<ThreadItem>>> {
    // Surface a 404 for unknown threads rather than an empty page.
    state.store.load_thread(&thread_id).await?;

    let limit = query.limit.min(MAX_PAGE_SIZE);
    let page = state
        .store
        .list_items(&thread_id, query.after.as_deref(), limit, query.order)
        .await?;
    Ok(Json(page))
}

/// Delete a thread and everything it owns. Idempotent: deleting an absent
/// id still answers 204.
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_thread(&thread_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
