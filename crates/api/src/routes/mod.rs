pub mod content;
pub mod health;
pub mod pages;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /public/content                                  all live content
/// /public/content/{key}                            one live value
/// /public/pages/{page_key}                         live values for a page
///
/// /admin/content                                   list (admin only)
/// /admin/content/validate                          validate edit values (POST)
/// /admin/content/{key}                             get, upsert, delete
///
/// /admin/pages                                     editable page registry
/// /admin/pages/{page_key}/drafts                   list, create
/// /admin/pages/{page_key}/drafts/latest            newest draft
/// /admin/pages/{page_key}/drafts/published         live draft
/// /admin/pages/{page_key}/drafts/diff              compare versions (?from=&to=)
/// /admin/pages/{page_key}/drafts/{id}              get
/// /admin/pages/{page_key}/drafts/{id}/publish      publish (POST)
/// /admin/pages/{page_key}/drafts/{id}/restore      restore as new draft (POST)
/// /admin/pages/{page_key}/drafts/{id}/retry-publish  re-apply live content (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/public", public::router())
        .nest("/admin/content", content::router())
        .nest("/admin/pages", pages::router())
}
