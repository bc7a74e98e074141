//! Unauthenticated read routes used by the public site.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Public read routes mounted at `/public`.
///
/// ```text
/// GET /content               -> list_content
/// GET /content/{key}         -> get_content
/// GET /pages/{page_key}      -> get_page_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", get(public::list_content))
        .route("/content/{key}", get(public::get_content))
        .route("/pages/{page_key}", get(public::get_page_content))
}
