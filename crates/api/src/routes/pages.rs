//! Route definitions for the page registry and the draft workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{drafts, pages};
use crate::state::AppState;

/// Admin page routes mounted at `/admin/pages`.
///
/// ```text
/// GET  /                                      -> list_pages
/// GET  /{page_key}/drafts                     -> list_drafts
/// POST /{page_key}/drafts                     -> create_draft
/// GET  /{page_key}/drafts/latest              -> get_latest_draft
/// GET  /{page_key}/drafts/published           -> get_published_draft
/// GET  /{page_key}/drafts/diff                -> diff_versions
/// GET  /{page_key}/drafts/{id}                -> get_draft
/// POST /{page_key}/drafts/{id}/publish        -> publish_draft
/// POST /{page_key}/drafts/{id}/restore        -> restore_draft
/// POST /{page_key}/drafts/{id}/retry-publish  -> retry_publish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages))
        .route(
            "/{page_key}/drafts",
            get(drafts::list_drafts).post(drafts::create_draft),
        )
        .route("/{page_key}/drafts/latest", get(drafts::get_latest_draft))
        .route(
            "/{page_key}/drafts/published",
            get(drafts::get_published_draft),
        )
        .route("/{page_key}/drafts/diff", get(drafts::diff_versions))
        .route("/{page_key}/drafts/{id}", get(drafts::get_draft))
        .route("/{page_key}/drafts/{id}/publish", post(drafts::publish_draft))
        .route("/{page_key}/drafts/{id}/restore", post(drafts::restore_draft))
        .route(
            "/{page_key}/drafts/{id}/retry-publish",
            post(drafts::retry_publish),
        )
}
