use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Admin content routes mounted at `/admin/content`.
///
/// ```text
/// GET    /              -> list_content
/// POST   /validate      -> validate_values
/// GET    /{key}         -> get_content
/// PUT    /{key}         -> upsert_content
/// DELETE /{key}         -> delete_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content))
        .route("/validate", post(content::validate_values))
        .route(
            "/{key}",
            get(content::get_content)
                .put(content::upsert_content)
                .delete(content::delete_content),
        )
}
