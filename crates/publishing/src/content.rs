//! Content store accessor.
//!
//! Public pages only ever read through this type; admins also write through
//! it. Writes are visible to the next read, so any UI-level cache must be
//! invalidated by the caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use wedsite_core::content::{validate_key, validate_value};
use wedsite_core::error::CoreError;
use wedsite_core::pages::validate_page_key;
use wedsite_db::models::content_item::ContentItem;

use crate::error::PublishResult;
use crate::store::ContentStore;

/// Reads and writes live content.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub async fn health_check(&self) -> PublishResult<()> {
        Ok(self.store.health_check().await?)
    }

    /// All content items, ordered by key.
    pub async fn get_all(&self) -> PublishResult<Vec<ContentItem>> {
        Ok(self.store.get_all().await?)
    }

    /// The content item for `key`, or `NotFound`.
    pub async fn get_by_key(&self, key: &str) -> PublishResult<ContentItem> {
        self.store
            .find_by_key(key)
            .await?
            .ok_or_else(|| CoreError::not_found("ContentItem", key).into())
    }

    /// Live values for a page's registered keys. Keys without a row are
    /// omitted.
    pub async fn get_page_content(&self, page_key: &str) -> PublishResult<BTreeMap<String, String>> {
        let page = validate_page_key(page_key)?;
        let keys: Vec<String> = page.content_keys.iter().map(|k| k.to_string()).collect();
        let items = self.store.find_by_keys(&keys).await?;
        Ok(items.into_iter().map(|item| (item.key, item.value)).collect())
    }

    /// Write a value directly, bypassing drafts.
    pub async fn upsert(&self, key: &str, value: &str) -> PublishResult<ContentItem> {
        validate_key(key)?;
        validate_value(value)?;

        let item = self.store.upsert(key, value).await?;
        tracing::info!(key = %item.key, content_id = item.id, "Content upserted");
        Ok(item)
    }

    /// Delete a key. Deleting an absent key succeeds and returns `false`.
    pub async fn delete(&self, key: &str) -> PublishResult<bool> {
        let removed = self.store.delete(key).await?;
        if removed {
            tracing::info!(key, "Content deleted");
        } else {
            tracing::debug!(key, "Content delete skipped, key absent");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::PublishError;
    use crate::memory::MemoryContentStore;

    fn service() -> ContentService {
        ContentService::new(Arc::new(MemoryContentStore::new()))
    }

    #[tokio::test]
    async fn get_all_is_ordered_by_key() {
        let content = service();
        content.upsert("home_title", "Hi").await.unwrap();
        content.upsert("faq_items", "[]").await.unwrap();
        content.upsert("dress_code", "Cocktail").await.unwrap();

        let keys: Vec<_> = content
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec!["dress_code", "faq_items", "home_title"]);
    }

    #[tokio::test]
    async fn upsert_updates_in_place() {
        let content = service();
        let first = content.upsert("home_title", "Hi").await.unwrap();
        let second = content.upsert("home_title", "Hello").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(content.get_by_key("home_title").await.unwrap().value, "Hello");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let err = service().get_by_key("nope").await.unwrap_err();
        assert_matches!(err, PublishError::Core(CoreError::NotFound { entity: "ContentItem", .. }));
    }

    #[tokio::test]
    async fn delete_missing_key_is_idempotent() {
        let content = service();
        assert!(!content.delete("never_existed").await.unwrap());

        content.upsert("faq_intro", "Hi").await.unwrap();
        assert!(content.delete("faq_intro").await.unwrap());
        assert!(!content.delete("faq_intro").await.unwrap());
    }

    #[tokio::test]
    async fn upsert_rejects_invalid_structured_value() {
        let err = service().upsert("faq_items", "[{").await.unwrap_err();
        assert_matches!(err, PublishError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn page_content_only_returns_page_keys() {
        let content = service();
        content.upsert("faq_items", "[]").await.unwrap();
        content.upsert("home_title", "Hi").await.unwrap();

        let faq = content.get_page_content("faq").await.unwrap();
        assert_eq!(faq.len(), 1);
        assert_eq!(faq["faq_items"], "[]");

        assert!(content.get_page_content("guestbook").await.is_err());
    }
}
