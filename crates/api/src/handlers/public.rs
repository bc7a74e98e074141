//! Handlers for public content reads.
//!
//! No authentication. Every request reads the content store directly, so a
//! publish is visible on the next request.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/public/content
pub async fn list_content(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.content_service().get_all().await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/public/content/{key}
pub async fn get_content(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state.content_service().get_by_key(&key).await?;
    Ok(Json(DataResponse { data: item }))
}

/// GET /api/v1/public/pages/{page_key}
///
/// Live values for the page's keys as a `key -> value` object. Keys never
/// written are omitted.
pub async fn get_page_content(
    State(state): State<AppState>,
    Path(page_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let values = state.content_service().get_page_content(&page_key).await?;
    Ok(Json(DataResponse { data: values }))
}
