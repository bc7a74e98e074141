//! Handlers for direct content management (admin only).
//!
//! Writes here bypass drafts and take effect immediately.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wedsite_core::content::ContentValue;
use wedsite_db::models::content_item::UpsertContentItem;
use wedsite_publishing::editor::EditEntry;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/content/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateValues {
    pub values: BTreeMap<String, String>,
}

/// GET /api/v1/admin/content
pub async fn list_content(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state.content_service().get_all().await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/content/{key}
pub async fn get_content(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state.content_service().get_by_key(&key).await?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/admin/content/{key}
///
/// Create or replace a value. JSON strings are stored verbatim; any other
/// JSON value is stored as compact JSON text.
pub async fn upsert_content(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpsertContentItem>,
) -> AppResult<impl IntoResponse> {
    let value = ContentValue::from(input.value).to_stored_string();
    let item = state.content_service().upsert(&key, &value).await?;

    tracing::info!(key = %item.key, user_id = %admin.user_id, "Content written directly");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/content/{key}
///
/// Idempotent: deleting an absent key also returns 204.
pub async fn delete_content(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let removed = state.content_service().delete(&key).await?;

    tracing::info!(key = %key, removed, user_id = %admin.user_id, "Content delete requested");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/content/validate
///
/// Check editor values without saving anything. Returns one entry per key
/// with `is_valid` and `error_message`.
pub async fn validate_values(
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<ValidateValues>,
) -> AppResult<impl IntoResponse> {
    let results: BTreeMap<String, EditEntry> = input
        .values
        .into_iter()
        .map(|(key, value)| (key, EditEntry::new(value)))
        .collect();

    Ok(Json(DataResponse { data: results }))
}
