//! Content item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wedsite_core::types::{DbId, Timestamp};

/// A row from the `content_items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for writing a content value. The key comes from the request path.
///
/// Accepts either a string or any JSON value; non-strings are stored as
/// compact JSON text.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertContentItem {
    pub value: serde_json::Value,
}
