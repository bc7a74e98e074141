//! Handlers for page drafts: versioning, publish, restore, and diff.
//!
//! Every handler acts through a [`DraftManager`](wedsite_publishing::DraftManager)
//! bound to the calling admin's session.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wedsite_core::types::DbId;
use wedsite_db::models::page_draft::CreatePageDraft;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /drafts/diff`.
#[derive(Debug, Deserialize)]
pub struct DiffParams {
    pub from: i32,
    pub to: i32,
}

/// GET /api/v1/admin/pages/{page_key}/drafts
///
/// All drafts for the page, newest version first.
pub async fn list_drafts(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let drafts = state.draft_manager(admin).list_drafts(&page_key).await?;
    Ok(Json(DataResponse { data: drafts }))
}

/// POST /api/v1/admin/pages/{page_key}/drafts
///
/// Save a new version. With `expected_version` set, fails with 409 if
/// another version was saved first.
pub async fn create_draft(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_key): Path<String>,
    Json(input): Json<CreatePageDraft>,
) -> AppResult<impl IntoResponse> {
    let manager = state.draft_manager(admin);
    let draft = match input.expected_version {
        Some(expected) => {
            manager
                .create_draft_expecting(&page_key, input.content, input.notes, expected)
                .await?
        }
        None => {
            manager
                .create_draft(&page_key, input.content, input.notes, None)
                .await?
        }
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// GET /api/v1/admin/pages/{page_key}/drafts/latest
///
/// `data` is `null` when the page has no drafts.
pub async fn get_latest_draft(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let draft = state.draft_manager(admin).get_latest_draft(&page_key).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// GET /api/v1/admin/pages/{page_key}/drafts/published
///
/// `data` is `null` when nothing has been published for the page.
pub async fn get_published_draft(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let draft = state
        .draft_manager(admin)
        .get_published_draft(&page_key)
        .await?;
    Ok(Json(DataResponse { data: draft }))
}

/// GET /api/v1/admin/pages/{page_key}/drafts/diff?from=&to=
pub async fn diff_versions(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_key): Path<String>,
    Query(params): Query<DiffParams>,
) -> AppResult<impl IntoResponse> {
    let changes = state
        .draft_manager(admin)
        .diff_versions(&page_key, params.from, params.to)
        .await?;
    Ok(Json(DataResponse { data: changes }))
}

/// GET /api/v1/admin/pages/{page_key}/drafts/{id}
pub async fn get_draft(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((page_key, draft_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let draft = state.draft_manager(admin).get_draft(draft_id, &page_key).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// POST /api/v1/admin/pages/{page_key}/drafts/{id}/publish
///
/// Make the draft live and copy its content to the public site. Returns
/// 502 with the applied and failed keys if only part of the content was
/// written.
pub async fn publish_draft(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((page_key, draft_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let user_id = admin.user_id.clone();
    let draft = state
        .draft_manager(admin)
        .publish_draft(draft_id, &page_key)
        .await?;

    tracing::info!(
        page_key = %page_key,
        draft_id,
        version = draft.version,
        user_id = %user_id,
        "Draft published via API",
    );

    Ok(Json(DataResponse { data: draft }))
}

/// POST /api/v1/admin/pages/{page_key}/drafts/{id}/restore
///
/// Copy an old version forward as a new, unpublished draft.
pub async fn restore_draft(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((page_key, draft_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let draft = state
        .draft_manager(admin)
        .restore_version(draft_id, &page_key, None)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// POST /api/v1/admin/pages/{page_key}/drafts/{id}/retry-publish
///
/// Re-apply the published draft's content after a partial publish.
pub async fn retry_publish(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((page_key, draft_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let draft = state
        .draft_manager(admin)
        .retry_publish(draft_id, &page_key)
        .await?;
    Ok(Json(DataResponse { data: draft }))
}
