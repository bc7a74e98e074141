//! Visual editor controller.
//!
//! Bridges the admin editing surface to the draft manager. Edits are held in
//! a local buffer and validated as they change; nothing reaches a store
//! until the admin saves, publishes, restores, or reverts. A failed store
//! call leaves the buffer untouched and queues an error [`Notice`].

use std::collections::BTreeMap;

use serde::Serialize;
use wedsite_core::content::{format_json, validate_edit, ContentMap, ContentValue};
use wedsite_core::pages::{validate_page_key, EditablePage};
use wedsite_core::types::DbId;
use wedsite_db::models::page_draft::PageDraft;

use crate::error::PublishError;
use crate::manager::DraftManager;

/// Notes attached to drafts created by [`VisualEditor::publish`].
pub const PUBLISH_NOTES: &str = "Published from visual editor";

/// One field of the edit buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditEntry {
    pub value: String,
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl EditEntry {
    /// Build an entry and validate its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        match validate_edit(&value) {
            Ok(()) => Self {
                value,
                is_valid: true,
                error_message: None,
            },
            Err(e) => Self {
                value,
                is_valid: false,
                error_message: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible notification produced by an editor action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("No page selected")]
    NoPageSelected,

    #[error("'{0}' is not an editable field on this page")]
    UnknownField(String),

    /// Save and publish are refused while any field is invalid.
    #[error("Fix invalid fields before saving: {}", .0.join(", "))]
    InvalidEdits(Vec<String>),

    #[error(transparent)]
    Workflow(#[from] PublishError),
}

/// Editing session for one page at a time.
pub struct VisualEditor {
    manager: DraftManager,
    page: Option<&'static EditablePage>,
    live: BTreeMap<String, String>,
    buffer: BTreeMap<String, EditEntry>,
    history: Vec<PageDraft>,
    notices: Vec<Notice>,
}

impl VisualEditor {
    pub fn new(manager: DraftManager) -> Self {
        Self {
            manager,
            page: None,
            live: BTreeMap::new(),
            buffer: BTreeMap::new(),
            history: Vec::new(),
            notices: Vec::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn page(&self) -> Option<&'static EditablePage> {
        self.page
    }

    pub fn entry(&self, key: &str) -> Option<&EditEntry> {
        self.buffer.get(key)
    }

    pub fn buffer(&self) -> &BTreeMap<String, EditEntry> {
        &self.buffer
    }

    /// Version history loaded for the selected page, newest first.
    pub fn history(&self) -> &[PageDraft] {
        &self.history
    }

    /// Drain queued notifications.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── Page selection ───────────────────────────────────────────────

    /// Load the page's live content and history into a fresh buffer.
    pub async fn select_page(&mut self, page_key: &str) -> Result<(), EditorError> {
        let page = validate_page_key(page_key).map_err(PublishError::from)?;

        let loaded = async {
            let live = self.load_live(page).await?;
            let history = self.manager.list_drafts(page.key).await?;
            Ok::<_, PublishError>((live, history))
        }
        .await;

        match loaded {
            Ok((live, history)) => {
                self.page = Some(page);
                self.buffer = buffer_from(page, |key| live.get(key).cloned());
                self.live = live;
                self.history = history;
                tracing::debug!(page_key, "Editor page selected");
                Ok(())
            }
            Err(e) => Err(self.fail(format!("Failed to load page '{page_key}'"), e)),
        }
    }

    async fn load_live(&self, page: &EditablePage) -> Result<BTreeMap<String, String>, PublishError> {
        let live = self.manager.content().get_page_content(page.key).await?;
        Ok(live)
    }

    // ── Local edits ──────────────────────────────────────────────────

    /// Replace a field's value and re-validate it.
    pub fn on_edit_change(&mut self, key: &str, value: impl Into<String>) -> Result<(), EditorError> {
        let page = self.page.ok_or(EditorError::NoPageSelected)?;
        if !page.owns(key) {
            return Err(EditorError::UnknownField(key.to_string()));
        }
        self.buffer.insert(key.to_string(), EditEntry::new(value));
        Ok(())
    }

    /// Pretty-print a structured field in place. Invalid or free-text
    /// fields are left unchanged.
    pub fn format_field(&mut self, key: &str) -> Result<(), EditorError> {
        let entry = self
            .buffer
            .get(key)
            .ok_or_else(|| EditorError::UnknownField(key.to_string()))?;
        if let Ok(formatted) = format_json(&entry.value) {
            self.buffer.insert(key.to_string(), EditEntry::new(formatted));
        }
        Ok(())
    }

    /// Whether any field differs from its live value (absent live values
    /// compare as empty).
    pub fn has_unsaved_changes(&self) -> bool {
        self.buffer.iter().any(|(key, entry)| {
            let live = self.live.get(key).map(String::as_str).unwrap_or("");
            entry.value != live
        })
    }

    pub fn all_edits_valid(&self) -> bool {
        self.buffer.values().all(|entry| entry.is_valid)
    }

    fn invalid_fields(&self) -> Vec<String> {
        self.buffer
            .iter()
            .filter(|(_, entry)| !entry.is_valid)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Guard shared by save and publish. Runs before any store call.
    fn ensure_saveable(&self) -> Result<&'static EditablePage, EditorError> {
        let page = self.page.ok_or(EditorError::NoPageSelected)?;
        if !self.all_edits_valid() {
            return Err(EditorError::InvalidEdits(self.invalid_fields()));
        }
        Ok(page)
    }

    fn content_map(&self) -> Result<ContentMap, EditorError> {
        self.buffer
            .iter()
            .map(|(key, entry)| -> Result<(String, ContentValue), EditorError> {
                let value = ContentValue::from_edit(&entry.value).map_err(PublishError::from)?;
                Ok((key.clone(), value))
            })
            .collect()
    }

    // ── Store-backed actions ─────────────────────────────────────────

    /// Save the buffer as a new draft version.
    pub async fn save_draft(&mut self) -> Result<PageDraft, EditorError> {
        let page = self.ensure_saveable()?;
        let content = self.content_map()?;

        match self.manager.create_draft(page.key, content, None, None).await {
            Ok(draft) => {
                self.notify_success(format!("Draft saved as version {}", draft.version));
                self.refresh_history(page).await;
                Ok(draft)
            }
            Err(e) => Err(self.fail("Failed to save draft".into(), e)),
        }
    }

    /// Save the buffer as a new draft and publish it immediately.
    pub async fn publish(&mut self) -> Result<PageDraft, EditorError> {
        let page = self.ensure_saveable()?;
        let content = self.content_map()?;

        let draft = match self
            .manager
            .create_draft(page.key, content, Some(PUBLISH_NOTES.into()), None)
            .await
        {
            Ok(draft) => draft,
            Err(e) => return Err(self.fail("Failed to publish".into(), e)),
        };

        let result = self.manager.publish_draft(draft.id, page.key).await;
        self.refresh_history(page).await;

        match result {
            Ok(published) => {
                if let Ok(live) = self.load_live(page).await {
                    self.live = live;
                }
                self.notify_success(format!("Published version {}", published.version));
                Ok(published)
            }
            Err(e) => Err(self.fail(format!("Failed to publish version {}", draft.version), e)),
        }
    }

    /// Restore an old version as a new draft and load it into the buffer
    /// for review. The restored draft is not published.
    pub async fn restore(&mut self, draft_id: DbId, version: i32) -> Result<PageDraft, EditorError> {
        let page = self.page.ok_or(EditorError::NoPageSelected)?;

        match self.manager.restore_version(draft_id, page.key, None).await {
            Ok(restored) => {
                let content = restored.content();
                self.buffer = buffer_from(page, |key| content.get(key).map(|v| v.to_stored_string()));
                self.notify_success(format!(
                    "Restored version {version} as version {}. Review and publish to make it live.",
                    restored.version
                ));
                self.refresh_history(page).await;
                Ok(restored)
            }
            Err(e) => Err(self.fail(format!("Failed to restore version {version}"), e)),
        }
    }

    /// Discard local edits and reload live values.
    pub async fn revert(&mut self) -> Result<(), EditorError> {
        let page = self.page.ok_or(EditorError::NoPageSelected)?;

        match self.load_live(page).await {
            Ok(live) => {
                self.buffer = buffer_from(page, |key| live.get(key).cloned());
                self.live = live;
                self.notify_success("Changes discarded".into());
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to revert changes".into(), e)),
        }
    }

    async fn refresh_history(&mut self, page: &EditablePage) {
        match self.manager.list_drafts(page.key).await {
            Ok(history) => self.history = history,
            Err(e) => tracing::warn!(page_key = page.key, error = %e, "Failed to refresh history"),
        }
    }

    // ── Notices ──────────────────────────────────────────────────────

    fn notify_success(&mut self, message: String) {
        self.notices.push(Notice {
            level: NoticeLevel::Success,
            message,
        });
    }

    fn fail(&mut self, action: String, err: PublishError) -> EditorError {
        tracing::warn!(error = %err, "{action}");
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message: format!("{action}: {err}"),
        });
        EditorError::Workflow(err)
    }
}

/// A buffer holding every field of `page`, missing values starting empty.
fn buffer_from(
    page: &EditablePage,
    value_for: impl Fn(&str) -> Option<String>,
) -> BTreeMap<String, EditEntry> {
    page.content_keys
        .iter()
        .map(|&key| {
            let value = value_for(key).unwrap_or_default();
            (key.to_string(), EditEntry::new(value))
        })
        .collect()
}
