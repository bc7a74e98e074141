use axum::response::IntoResponse;
use axum::Json;
use wedsite_core::pages::all_pages;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;

/// GET /api/v1/admin/pages
///
/// The pages editable from the visual editor and the keys each one owns.
pub async fn list_pages(RequireAdmin(_admin): RequireAdmin) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse { data: all_pages() }))
}
