//! Page draft entity model and DTOs.
//!
//! Drafts are immutable snapshots of a page's content. Only the publish
//! state (`is_published`, `publish_status_id`, `published_at`) ever changes
//! after insert.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use wedsite_core::content::ContentMap;
use wedsite_core::types::{DbId, Timestamp};

use super::status::{PublishStatus, StatusId};

/// A row from the `page_drafts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PageDraft {
    pub id: DbId,
    pub page_key: String,
    pub content: Json<ContentMap>,
    pub version: i32,
    pub is_published: bool,
    pub publish_status_id: StatusId,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub published_at: Option<Timestamp>,
    pub notes: Option<String>,
}

impl PageDraft {
    /// The snapshot held by this draft.
    pub fn content(&self) -> &ContentMap {
        &self.content.0
    }

    /// Decoded publish status. Unknown ids read as `Draft`.
    pub fn publish_status(&self) -> PublishStatus {
        PublishStatus::from_id(self.publish_status_id).unwrap_or(PublishStatus::Draft)
    }
}

/// DTO for inserting a new draft. The version is assigned by the caller.
#[derive(Debug, Clone)]
pub struct NewPageDraft {
    pub page_key: String,
    pub content: ContentMap,
    pub version: i32,
    pub created_by: Option<String>,
    pub notes: Option<String>,
}

/// Request body for creating a draft.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePageDraft {
    pub content: ContentMap,
    pub notes: Option<String>,
    /// When set, creation fails with a conflict unless this is still the
    /// page's latest version (0 when the page has no drafts).
    pub expected_version: Option<i32>,
}

/// One key's difference between two draft versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentChange {
    pub key: String,
    pub change: ChangeKind,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
}
