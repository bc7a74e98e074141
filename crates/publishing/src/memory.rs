//! In-process stores.
//!
//! Used by the test suites and by the server when `STORE_BACKEND=memory`.
//! Both stores count every call and support fault injection so callers can
//! assert on backend traffic and exercise failure paths.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::RwLock;
use wedsite_core::types::{DbId, Timestamp};
use wedsite_db::models::content_item::ContentItem;
use wedsite_db::models::page_draft::{NewPageDraft, PageDraft};
use wedsite_db::models::status::PublishStatus;

use crate::store::{ContentStore, DraftStore, StoreError};

/// Shared fault-injection and call-counting state.
#[derive(Default)]
struct FaultSwitch {
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl FaultSwitch {
    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ContentState {
    next_id: DbId,
    rows: BTreeMap<String, ContentItem>,
}

/// [`ContentStore`] held in memory, keyed (and therefore ordered) by key.
#[derive(Default)]
pub struct MemoryContentStore {
    state: RwLock<ContentState>,
    failing_keys: RwLock<HashSet<String>>,
    faults: FaultSwitch,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.faults.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.faults.offline.store(offline, Ordering::SeqCst);
    }

    /// Make upserts of `key` fail until [`Self::clear_failures`] is called.
    pub async fn fail_upserts_for(&self, key: &str) {
        self.failing_keys.write().await.insert(key.to_string());
    }

    pub async fn clear_failures(&self) {
        self.failing_keys.write().await.clear();
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.faults.enter()
    }

    async fn get_all(&self) -> Result<Vec<ContentItem>, StoreError> {
        self.faults.enter()?;
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ContentItem>, StoreError> {
        self.faults.enter()?;
        Ok(self.state.read().await.rows.get(key).cloned())
    }

    async fn find_by_keys(&self, keys: &[String]) -> Result<Vec<ContentItem>, StoreError> {
        self.faults.enter()?;
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|item| keys.contains(&item.key))
            .cloned()
            .collect())
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<ContentItem, StoreError> {
        self.faults.enter()?;
        if self.failing_keys.read().await.contains(key) {
            return Err(StoreError::Unavailable(format!("write of '{key}' rejected")));
        }

        let mut state = self.state.write().await;
        let now = chrono::Utc::now();
        if let Some(item) = state.rows.get_mut(key) {
            item.value = value.to_string();
            item.updated_at = now;
            return Ok(item.clone());
        }

        state.next_id += 1;
        let item = ContentItem {
            id: state.next_id,
            key: key.to_string(),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(key.to_string(), item.clone());
        Ok(item)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.faults.enter()?;
        Ok(self.state.write().await.rows.remove(key).is_some())
    }
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DraftState {
    next_id: DbId,
    rows: Vec<PageDraft>,
}

impl DraftState {
    fn page_sorted(&self, page_key: &str) -> Vec<PageDraft> {
        let mut drafts: Vec<PageDraft> = self
            .rows
            .iter()
            .filter(|d| d.page_key == page_key)
            .cloned()
            .collect();
        drafts.sort_by(|a, b| b.version.cmp(&a.version));
        drafts
    }
}

/// [`DraftStore`] held in memory, enforcing the same uniqueness rules as
/// the database schema.
#[derive(Default)]
pub struct MemoryDraftStore {
    state: RwLock<DraftState>,
    faults: FaultSwitch,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.faults.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.faults.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn list_by_page(&self, page_key: &str) -> Result<Vec<PageDraft>, StoreError> {
        self.faults.enter()?;
        Ok(self.state.read().await.page_sorted(page_key))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PageDraft>, StoreError> {
        self.faults.enter()?;
        let state = self.state.read().await;
        Ok(state.rows.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_page_and_version(
        &self,
        page_key: &str,
        version: i32,
    ) -> Result<Option<PageDraft>, StoreError> {
        self.faults.enter()?;
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .find(|d| d.page_key == page_key && d.version == version)
            .cloned())
    }

    async fn find_latest(&self, page_key: &str) -> Result<Option<PageDraft>, StoreError> {
        self.faults.enter()?;
        Ok(self.state.read().await.page_sorted(page_key).into_iter().next())
    }

    async fn find_published(&self, page_key: &str) -> Result<Option<PageDraft>, StoreError> {
        self.faults.enter()?;
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .find(|d| d.page_key == page_key && d.is_published)
            .cloned())
    }

    async fn max_version(&self, page_key: &str) -> Result<i32, StoreError> {
        self.faults.enter()?;
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .filter(|d| d.page_key == page_key)
            .map(|d| d.version)
            .max()
            .unwrap_or(0))
    }

    async fn insert(&self, input: &NewPageDraft) -> Result<PageDraft, StoreError> {
        self.faults.enter()?;
        let mut state = self.state.write().await;
        if state
            .rows
            .iter()
            .any(|d| d.page_key == input.page_key && d.version == input.version)
        {
            return Err(StoreError::UniqueViolation(
                "uq_page_drafts_page_key_version".into(),
            ));
        }

        state.next_id += 1;
        let draft = PageDraft {
            id: state.next_id,
            page_key: input.page_key.clone(),
            content: Json(input.content.clone()),
            version: input.version,
            is_published: false,
            publish_status_id: PublishStatus::Draft.id(),
            created_by: input.created_by.clone(),
            created_at: chrono::Utc::now(),
            published_at: None,
            notes: input.notes.clone(),
        };
        state.rows.push(draft.clone());
        Ok(draft)
    }

    async fn set_published(
        &self,
        page_key: &str,
        draft_id: DbId,
        published_at: Timestamp,
    ) -> Result<Option<PageDraft>, StoreError> {
        self.faults.enter()?;
        let mut state = self.state.write().await;
        if !state
            .rows
            .iter()
            .any(|d| d.id == draft_id && d.page_key == page_key)
        {
            return Ok(None);
        }

        for draft in state
            .rows
            .iter_mut()
            .filter(|d| d.page_key == page_key && d.is_published)
        {
            draft.is_published = false;
            draft.publish_status_id = PublishStatus::Draft.id();
            draft.published_at = None;
        }

        let target = state.rows.iter_mut().find(|d| d.id == draft_id);
        Ok(target.map(|draft| {
            draft.is_published = true;
            draft.publish_status_id = PublishStatus::Publishing.id();
            draft.published_at = Some(published_at);
            draft.clone()
        }))
    }

    async fn set_publish_status(
        &self,
        draft_id: DbId,
        status: PublishStatus,
    ) -> Result<Option<PageDraft>, StoreError> {
        self.faults.enter()?;
        let mut state = self.state.write().await;
        let target = state
            .rows
            .iter_mut()
            .find(|d| d.id == draft_id && d.is_published);
        Ok(target.map(|draft| {
            draft.publish_status_id = status.id();
            draft.clone()
        }))
    }
}
