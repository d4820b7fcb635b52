//! # SQLite Key-Value Store
//!
//! [`KeyValueStore`] over the `kv_store` table.
//!
//! ```text
//!   kv_store
//!   ┌──────────────────────┬─────────────────────────┬──────────────────────┐
//!   │ key (PK)             │ value                   │ updated_at           │
//!   ├──────────────────────┼─────────────────────────┼──────────────────────┤
//!   │ draft                │ {"tenantName":...}      │ 2025-06-15T12:00:00Z │
//!   │ receipts             │ [{"id":...}, ...]       │ 2025-06-15T12:01:00Z │
//!   │ receipt_counter_2025 │ 3                       │ 2025-06-15T12:01:00Z │
//!   └──────────────────────┴─────────────────────────┴──────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::KeyValueStore;
use crate::error::DbResult;

/// Key-value store backed by the SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Creates a store over an existing (migrated) pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKvStore { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing key");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        debug!(key = %key, "Removing key");

        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> DbResult<Vec<String>> {
        // substr avoids LIKE wildcard escaping ('_' is a wildcard)
        let keys: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT key FROM kv_store
            WHERE substr(key, 1, length(?1)) = ?1
            ORDER BY key ASC
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn store() -> SqliteKvStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv_store()
    }

    #[tokio::test]
    async fn test_upsert_and_read() {
        let store = store().await;
        assert_eq!(store.get("draft").await.unwrap(), None);

        store.set("draft", "first").await.unwrap();
        store.set("draft", "second").await.unwrap();
        assert_eq!(store.get("draft").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = store().await;
        store.set("receipts", "[]").await.unwrap();

        store.remove("receipts").await.unwrap();
        store.remove("receipts").await.unwrap();
        assert_eq!(store.get("receipts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prefix_is_literal() {
        let store = store().await;
        store.set("receipt_counter_2024", "4").await.unwrap();
        store.set("receipt_counter_2025", "9").await.unwrap();
        // '_' would match any character under LIKE
        store.set("receiptXcounterX2025", "1").await.unwrap();
        store.set("receipts", "[]").await.unwrap();

        let keys = store.keys_with_prefix("receipt_counter_").await.unwrap();
        assert_eq!(keys, vec!["receipt_counter_2024", "receipt_counter_2025"]);
    }
}
