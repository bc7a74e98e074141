//! Repository for the `content_items` table.

use sqlx::PgPool;

use crate::models::content_item::ContentItem;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, value, created_at, updated_at";

/// Provides read, upsert, and delete operations for live content.
pub struct ContentRepo;

impl ContentRepo {
    /// List every content item, ordered by key.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_items ORDER BY key");
        sqlx::query_as::<_, ContentItem>(&query).fetch_all(pool).await
    }

    /// Find a content item by exact key.
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_items WHERE key = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Find all content items whose key is in `keys`, ordered by key.
    pub async fn find_by_keys(
        pool: &PgPool,
        keys: &[String],
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_items WHERE key = ANY($1) ORDER BY key");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(keys)
            .fetch_all(pool)
            .await
    }

    /// Update the value for `key`, inserting the row if it does not exist.
    pub async fn upsert(pool: &PgPool, key: &str, value: &str) -> Result<ContentItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_items (key, value)
             VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Delete a content item by key. Returns `true` if a row was removed.
    pub async fn delete_by_key(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_items WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
