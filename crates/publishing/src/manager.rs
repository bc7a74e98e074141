//! Draft versioning and the publish workflow.
//!
//! Every draft is an immutable snapshot of one page's content. Versions are
//! assigned as `max + 1` per page. Publishing marks exactly one draft per
//! page live and copies its content into the content store.
//!
//! The content fan-out is not transactional: a failure part-way leaves the
//! draft in `publish_failed` with the applied and failed keys reported.
//! Because every write is an upsert, [`DraftManager::retry_publish`] can
//! re-apply the same draft safely.

use std::collections::BTreeSet;
use std::sync::Arc;

use wedsite_core::content::{validate_content_map, ContentMap};
use wedsite_core::error::CoreError;
use wedsite_core::pages::{validate_page_key, EditablePage};
use wedsite_core::session::AdminSession;
use wedsite_core::types::DbId;
use wedsite_db::models::page_draft::{ChangeKind, ContentChange, NewPageDraft, PageDraft};
use wedsite_db::models::status::PublishStatus;

use crate::content::ContentService;
use crate::error::{KeyFailure, PublishError, PublishResult};
use crate::store::{ContentStore, DraftStore};

/// Orchestrates drafts over the draft and content stores on behalf of an
/// (optional) admin session.
#[derive(Clone)]
pub struct DraftManager {
    content: ContentService,
    drafts: Arc<dyn DraftStore>,
    session: Option<AdminSession>,
}

impl DraftManager {
    pub fn new(
        content: Arc<dyn ContentStore>,
        drafts: Arc<dyn DraftStore>,
        session: Option<AdminSession>,
    ) -> Self {
        Self {
            content: ContentService::new(content),
            drafts,
            session,
        }
    }

    pub fn session(&self) -> Option<&AdminSession> {
        self.session.as_ref()
    }

    /// The content accessor sharing this manager's content store.
    pub fn content(&self) -> &ContentService {
        &self.content
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// All drafts for a page, newest version first.
    pub async fn list_drafts(&self, page_key: &str) -> PublishResult<Vec<PageDraft>> {
        validate_page_key(page_key)?;
        Ok(self.drafts.list_by_page(page_key).await?)
    }

    pub async fn get_latest_draft(&self, page_key: &str) -> PublishResult<Option<PageDraft>> {
        validate_page_key(page_key)?;
        Ok(self.drafts.find_latest(page_key).await?)
    }

    pub async fn get_published_draft(&self, page_key: &str) -> PublishResult<Option<PageDraft>> {
        validate_page_key(page_key)?;
        Ok(self.drafts.find_published(page_key).await?)
    }

    /// A single draft, which must belong to `page_key`.
    pub async fn get_draft(&self, draft_id: DbId, page_key: &str) -> PublishResult<PageDraft> {
        validate_page_key(page_key)?;
        self.drafts
            .find_by_id(draft_id)
            .await?
            .filter(|d| d.page_key == page_key)
            .ok_or_else(|| CoreError::not_found("PageDraft", draft_id).into())
    }

    // ── Create / restore ─────────────────────────────────────────────

    /// Save a new draft version for a page.
    ///
    /// `created_by` defaults to the session's admin.
    pub async fn create_draft(
        &self,
        page_key: &str,
        content: ContentMap,
        notes: Option<String>,
        created_by: Option<String>,
    ) -> PublishResult<PageDraft> {
        self.insert_next_version(page_key, content, notes, created_by, None)
            .await
    }

    /// Like [`Self::create_draft`], but fails with `Conflict` unless the
    /// page's latest version is still `expected_version` (0 for none).
    pub async fn create_draft_expecting(
        &self,
        page_key: &str,
        content: ContentMap,
        notes: Option<String>,
        expected_version: i32,
    ) -> PublishResult<PageDraft> {
        self.insert_next_version(page_key, content, notes, None, Some(expected_version))
            .await
    }

    async fn insert_next_version(
        &self,
        page_key: &str,
        content: ContentMap,
        notes: Option<String>,
        created_by: Option<String>,
        expected_version: Option<i32>,
    ) -> PublishResult<PageDraft> {
        let page = validate_page_key(page_key)?;
        validate_content_map(&content)?;
        ensure_page_owns_keys(page, &content)?;

        let current = self.drafts.max_version(page_key).await?;
        if let Some(expected) = expected_version {
            if expected != current {
                return Err(CoreError::Conflict(format!(
                    "Page '{page_key}' is at version {current}, expected {expected}. \
                     Reload before saving."
                ))
                .into());
            }
        }

        let input = NewPageDraft {
            page_key: page_key.to_string(),
            content,
            version: current + 1,
            created_by: created_by.or_else(|| self.session.as_ref().map(|s| s.user_id.clone())),
            notes,
        };

        let draft = self.drafts.insert(&input).await.map_err(|e| {
            if e.is_unique_violation() {
                PublishError::Core(CoreError::Conflict(format!(
                    "Version {} of page '{page_key}' was saved concurrently. Reload and retry.",
                    input.version
                )))
            } else {
                PublishError::Store(e)
            }
        })?;

        tracing::info!(
            page_key,
            draft_id = draft.id,
            version = draft.version,
            created_by = ?draft.created_by,
            "Page draft created"
        );
        Ok(draft)
    }

    /// Clone an old version forward as a new, unpublished draft.
    ///
    /// The source draft is not modified.
    pub async fn restore_version(
        &self,
        draft_id: DbId,
        page_key: &str,
        created_by: Option<String>,
    ) -> PublishResult<PageDraft> {
        let source = self.get_draft(draft_id, page_key).await?;
        let notes = format!("Restored from version {}", source.version);

        let restored = self
            .create_draft(page_key, source.content().clone(), Some(notes), created_by)
            .await?;

        tracing::info!(
            page_key,
            source_version = source.version,
            new_version = restored.version,
            "Page draft restored"
        );
        Ok(restored)
    }

    // ── Publish ──────────────────────────────────────────────────────

    /// Make a draft the page's live version and copy its content into the
    /// content store.
    ///
    /// If marking the draft fails, no content is written. If some content
    /// writes fail, every key is still attempted and
    /// [`PublishError::PartialPublish`] reports which ones failed.
    pub async fn publish_draft(&self, draft_id: DbId, page_key: &str) -> PublishResult<PageDraft> {
        validate_page_key(page_key)?;

        let live = self
            .drafts
            .set_published(page_key, draft_id, chrono::Utc::now())
            .await?
            .ok_or_else(|| CoreError::not_found("PageDraft", draft_id))?;

        tracing::info!(
            page_key,
            draft_id,
            version = live.version,
            keys = live.content().len(),
            "Page draft marked published, applying content"
        );

        self.apply_content(live).await
    }

    /// Re-apply the content of the page's published draft, completing a
    /// publish that previously failed part-way.
    pub async fn retry_publish(&self, draft_id: DbId, page_key: &str) -> PublishResult<PageDraft> {
        let draft = self.get_draft(draft_id, page_key).await?;
        if !draft.is_published {
            return Err(CoreError::Conflict(format!(
                "Version {} is not the published version of '{page_key}'",
                draft.version
            ))
            .into());
        }

        tracing::info!(page_key, draft_id, version = draft.version, "Retrying publish");
        self.apply_content(draft).await
    }

    async fn apply_content(&self, draft: PageDraft) -> PublishResult<PageDraft> {
        let mut applied = Vec::new();
        let mut failed = Vec::new();

        for (key, value) in draft.content() {
            match self
                .content
                .store()
                .upsert(key, &value.to_stored_string())
                .await
            {
                Ok(_) => applied.push(key.clone()),
                Err(e) => {
                    tracing::warn!(draft_id = draft.id, key = %key, error = %e, "Content write failed");
                    failed.push(KeyFailure {
                        key: key.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if !failed.is_empty() {
            tracing::error!(
                draft_id = draft.id,
                page_key = %draft.page_key,
                version = draft.version,
                applied = ?applied,
                failed = ?failed.iter().map(|f| f.key.as_str()).collect::<Vec<_>>(),
                "Publish incomplete, content store partially updated"
            );
            if let Err(e) = self
                .drafts
                .set_publish_status(draft.id, PublishStatus::PublishFailed)
                .await
            {
                tracing::warn!(draft_id = draft.id, error = %e, "Failed to record publish failure");
            }
            return Err(PublishError::PartialPublish {
                draft_id: draft.id,
                version: draft.version,
                applied,
                failed,
            });
        }

        let published = self
            .drafts
            .set_publish_status(draft.id, PublishStatus::Published)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!(
                    "Version {} of '{}' was superseded while publishing",
                    draft.version, draft.page_key
                ))
            })?;

        tracing::info!(
            page_key = %published.page_key,
            draft_id = published.id,
            version = published.version,
            keys = applied.len(),
            "Page draft published"
        );
        Ok(published)
    }

    // ── Diff ─────────────────────────────────────────────────────────

    /// Per-key changes going from `from_version` to `to_version`, ordered by
    /// key. Values are compared in their stored text form.
    pub async fn diff_versions(
        &self,
        page_key: &str,
        from_version: i32,
        to_version: i32,
    ) -> PublishResult<Vec<ContentChange>> {
        validate_page_key(page_key)?;
        let from = self.find_version(page_key, from_version).await?;
        let to = self.find_version(page_key, to_version).await?;
        Ok(diff_content(from.content(), to.content()))
    }

    async fn find_version(&self, page_key: &str, version: i32) -> PublishResult<PageDraft> {
        self.drafts
            .find_by_page_and_version(page_key, version)
            .await?
            .ok_or_else(|| {
                CoreError::not_found("PageDraft version", format!("{page_key}@{version}")).into()
            })
    }
}

fn ensure_page_owns_keys(page: &EditablePage, content: &ContentMap) -> Result<(), CoreError> {
    let foreign: Vec<&str> = content
        .keys()
        .filter(|k| !page.owns(k))
        .map(String::as_str)
        .collect();
    if foreign.is_empty() {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Keys not editable on page '{}': {}",
        page.key,
        foreign.join(", ")
    )))
}

/// Compare two snapshots key by key.
pub fn diff_content(from: &ContentMap, to: &ContentMap) -> Vec<ContentChange> {
    let keys: BTreeSet<&String> = from.keys().chain(to.keys()).collect();
    keys.into_iter()
        .filter_map(|key| {
            let before = from.get(key).map(|v| v.to_stored_string());
            let after = to.get(key).map(|v| v.to_stored_string());
            let change = match (&before, &after) {
                (None, Some(_)) => ChangeKind::Added,
                (Some(_), None) => ChangeKind::Removed,
                (Some(b), Some(a)) if b != a => ChangeKind::Changed,
                _ => return None,
            };
            Some(ContentChange {
                key: key.clone(),
                change,
                before,
                after,
            })
        })
        .collect()
}
