//! Repository for the `page_drafts` table.
//!
//! Drafts are append-only; the only in-place update is the publish state.

use sqlx::types::Json;
use sqlx::PgPool;
use wedsite_core::types::{DbId, Timestamp};

use crate::models::page_draft::{NewPageDraft, PageDraft};
use crate::models::status::PublishStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page_key, content, version, is_published, publish_status_id, \
    created_by, created_at, published_at, notes";

/// Provides insert, lookup, and publish-state operations for page drafts.
pub struct PageDraftRepo;

impl PageDraftRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new draft with the version chosen by the caller.
    ///
    /// A duplicate `(page_key, version)` fails with the
    /// `uq_page_drafts_page_key_version` unique violation.
    pub async fn create(pool: &PgPool, input: &NewPageDraft) -> Result<PageDraft, sqlx::Error> {
        let query = format!(
            "INSERT INTO page_drafts (page_key, content, version, created_by, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageDraft>(&query)
            .bind(&input.page_key)
            .bind(Json(&input.content))
            .bind(input.version)
            .bind(&input.created_by)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a draft by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PageDraft>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM page_drafts WHERE id = $1");
        sqlx::query_as::<_, PageDraft>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all drafts for a page, ordered by version descending.
    pub async fn list_by_page(pool: &PgPool, page_key: &str) -> Result<Vec<PageDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_drafts
             WHERE page_key = $1
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, PageDraft>(&query)
            .bind(page_key)
            .fetch_all(pool)
            .await
    }

    /// Find a specific version of a page.
    pub async fn find_by_page_and_version(
        pool: &PgPool,
        page_key: &str,
        version: i32,
    ) -> Result<Option<PageDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_drafts
             WHERE page_key = $1 AND version = $2"
        );
        sqlx::query_as::<_, PageDraft>(&query)
            .bind(page_key)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    // ── Version-specific operations ──────────────────────────────────

    /// Get the latest version number for a page (0 if none exist).
    pub async fn max_version(pool: &PgPool, page_key: &str) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(version), 0) FROM page_drafts WHERE page_key = $1",
        )
        .bind(page_key)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Find the draft with the highest version for a page.
    pub async fn find_latest_for_page(
        pool: &PgPool,
        page_key: &str,
    ) -> Result<Option<PageDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_drafts
             WHERE page_key = $1
             ORDER BY version DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, PageDraft>(&query)
            .bind(page_key)
            .fetch_optional(pool)
            .await
    }

    /// Find the published draft for a page (if any).
    pub async fn find_published_for_page(
        pool: &PgPool,
        page_key: &str,
    ) -> Result<Option<PageDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_drafts
             WHERE page_key = $1 AND is_published = true"
        );
        sqlx::query_as::<_, PageDraft>(&query)
            .bind(page_key)
            .fetch_optional(pool)
            .await
    }

    /// Mark a draft as published, un-marking any previously published draft
    /// for the same page first. Both updates run in one transaction.
    ///
    /// The target enters the `publishing` state. Returns `None` (and rolls
    /// back) if `draft_id` does not exist for `page_key`.
    pub async fn set_published(
        pool: &PgPool,
        page_key: &str,
        draft_id: DbId,
        published_at: Timestamp,
    ) -> Result<Option<PageDraft>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Unmark current published draft (if any)
        sqlx::query(
            "UPDATE page_drafts
             SET is_published = false, publish_status_id = $2, published_at = NULL
             WHERE page_key = $1 AND is_published = true",
        )
        .bind(page_key)
        .bind(PublishStatus::Draft.id())
        .execute(&mut *tx)
        .await?;

        // Mark the specified draft as published
        let query = format!(
            "UPDATE page_drafts
             SET is_published = true, publish_status_id = $3, published_at = $4
             WHERE id = $1 AND page_key = $2
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, PageDraft>(&query)
            .bind(draft_id)
            .bind(page_key)
            .bind(PublishStatus::Publishing.id())
            .bind(published_at)
            .fetch_optional(&mut *tx)
            .await?;

        if result.is_none() {
            tracing::debug!(page_key, draft_id, "Publish target missing, rolling back");
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(result)
    }

    /// Record the outcome of a publish fan-out on a live draft.
    ///
    /// Returns `None` if the draft does not exist or is no longer published.
    pub async fn set_publish_status(
        pool: &PgPool,
        draft_id: DbId,
        status: PublishStatus,
    ) -> Result<Option<PageDraft>, sqlx::Error> {
        let query = format!(
            "UPDATE page_drafts SET publish_status_id = $2
             WHERE id = $1 AND is_published = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageDraft>(&query)
            .bind(draft_id)
            .bind(status.id())
            .fetch_optional(pool)
            .await
    }
}
