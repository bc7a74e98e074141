//! Storage seams for the publishing workflow.
//!
//! Both stores are shared, multi-writer resources. Implementations must be
//! `Send + Sync` so they can live behind `Arc<dyn ...>` in server state.

use async_trait::async_trait;
use wedsite_core::types::{DbId, Timestamp};
use wedsite_db::models::content_item::ContentItem;
use wedsite_db::models::page_draft::{NewPageDraft, PageDraft};
use wedsite_db::models::status::PublishStatus;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// A failed call to a backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule rejected the write; carries the constraint name.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether this error came from a uniqueness constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::UniqueViolation(_) => true,
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            }
            _ => false,
        }
    }
}

/// Key/value table of live content read by the public pages.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Confirm the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// All content items, ordered by key.
    async fn get_all(&self) -> Result<Vec<ContentItem>, StoreError>;

    async fn find_by_key(&self, key: &str) -> Result<Option<ContentItem>, StoreError>;

    /// Content items whose key is in `keys`, ordered by key.
    async fn find_by_keys(&self, keys: &[String]) -> Result<Vec<ContentItem>, StoreError>;

    /// Update-if-exists, else insert. Visible to every later read.
    async fn upsert(&self, key: &str, value: &str) -> Result<ContentItem, StoreError>;

    /// Remove a row. Returns `false` when the key was absent.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

/// Append-only version history of page snapshots.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Drafts for a page, ordered by version descending.
    async fn list_by_page(&self, page_key: &str) -> Result<Vec<PageDraft>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<PageDraft>, StoreError>;

    async fn find_by_page_and_version(
        &self,
        page_key: &str,
        version: i32,
    ) -> Result<Option<PageDraft>, StoreError>;

    async fn find_latest(&self, page_key: &str) -> Result<Option<PageDraft>, StoreError>;

    async fn find_published(&self, page_key: &str) -> Result<Option<PageDraft>, StoreError>;

    /// Highest version for a page, 0 when it has no drafts.
    async fn max_version(&self, page_key: &str) -> Result<i32, StoreError>;

    /// Insert a draft. A duplicate `(page_key, version)` is a unique violation.
    async fn insert(&self, input: &NewPageDraft) -> Result<PageDraft, StoreError>;

    /// Clear the page's published draft, then mark `draft_id` published in
    /// the `publishing` state. Returns `None` without changes when the draft
    /// does not belong to the page.
    async fn set_published(
        &self,
        page_key: &str,
        draft_id: DbId,
        published_at: Timestamp,
    ) -> Result<Option<PageDraft>, StoreError>;

    /// Record a fan-out outcome on a live draft. Returns `None` when the
    /// draft is missing or no longer published.
    async fn set_publish_status(
        &self,
        draft_id: DbId,
        status: PublishStatus,
    ) -> Result<Option<PageDraft>, StoreError>;
}
