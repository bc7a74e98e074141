//! Store implementations backed by PostgreSQL through the repository layer.

use async_trait::async_trait;
use wedsite_core::types::{DbId, Timestamp};
use wedsite_db::models::content_item::ContentItem;
use wedsite_db::models::page_draft::{NewPageDraft, PageDraft};
use wedsite_db::models::status::PublishStatus;
use wedsite_db::repositories::{ContentRepo, PageDraftRepo};
use wedsite_db::DbPool;

use crate::store::{ContentStore, DraftStore, StoreError};

/// [`ContentStore`] over the `content_items` table.
#[derive(Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(wedsite_db::health_check(&self.pool).await?)
    }

    async fn get_all(&self) -> Result<Vec<ContentItem>, StoreError> {
        Ok(ContentRepo::list_all(&self.pool).await?)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ContentItem>, StoreError> {
        Ok(ContentRepo::find_by_key(&self.pool, key).await?)
    }

    async fn find_by_keys(&self, keys: &[String]) -> Result<Vec<ContentItem>, StoreError> {
        Ok(ContentRepo::find_by_keys(&self.pool, keys).await?)
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<ContentItem, StoreError> {
        Ok(ContentRepo::upsert(&self.pool, key, value).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(ContentRepo::delete_by_key(&self.pool, key).await?)
    }
}

/// [`DraftStore`] over the `page_drafts` table.
#[derive(Clone)]
pub struct PgDraftStore {
    pool: DbPool,
}

impl PgDraftStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftStore for PgDraftStore {
    async fn list_by_page(&self, page_key: &str) -> Result<Vec<PageDraft>, StoreError> {
        Ok(PageDraftRepo::list_by_page(&self.pool, page_key).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PageDraft>, StoreError> {
        Ok(PageDraftRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_page_and_version(
        &self,
        page_key: &str,
        version: i32,
    ) -> Result<Option<PageDraft>, StoreError> {
        Ok(PageDraftRepo::find_by_page_and_version(&self.pool, page_key, version).await?)
    }

    async fn find_latest(&self, page_key: &str) -> Result<Option<PageDraft>, StoreError> {
        Ok(PageDraftRepo::find_latest_for_page(&self.pool, page_key).await?)
    }

    async fn find_published(&self, page_key: &str) -> Result<Option<PageDraft>, StoreError> {
        Ok(PageDraftRepo::find_published_for_page(&self.pool, page_key).await?)
    }

    async fn max_version(&self, page_key: &str) -> Result<i32, StoreError> {
        Ok(PageDraftRepo::max_version(&self.pool, page_key).await?)
    }

    async fn insert(&self, input: &NewPageDraft) -> Result<PageDraft, StoreError> {
        Ok(PageDraftRepo::create(&self.pool, input).await?)
    }

    async fn set_published(
        &self,
        page_key: &str,
        draft_id: DbId,
        published_at: Timestamp,
    ) -> Result<Option<PageDraft>, StoreError> {
        Ok(PageDraftRepo::set_published(&self.pool, page_key, draft_id, published_at).await?)
    }

    async fn set_publish_status(
        &self,
        draft_id: DbId,
        status: PublishStatus,
    ) -> Result<Option<PageDraft>, StoreError> {
        Ok(PageDraftRepo::set_publish_status(&self.pool, draft_id, status).await?)
    }
}
