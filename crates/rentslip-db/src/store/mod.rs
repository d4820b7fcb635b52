//! # Key-Value Store
//!
//! The storage seam under [`ReceiptStore`](crate::receipt_store::ReceiptStore).
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KeyValueStore (trait)                             │
//! │   get / set / remove / keys_with_prefix                                │
//! │                                                                         │
//! │        ┌────────────────────┬───────────────────────┐                  │
//! │        ▼                    ▼                       ▼                  │
//! │  SqliteKvStore         MemoryStore             Arc<S>                  │
//! │  kv_store table        BTreeMap behind         shares one store        │
//! │  (sqlx pool)           a tokio RwLock          between owners          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings. The store knows nothing about drafts or
//! receipts, and it offers no transactions.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::DbResult;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteKvStore;

/// String-keyed, string-valued persistent map.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Inserts or overwrites a value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> DbResult<()>;

    /// Lists every key starting with `prefix`, in ascending order.
    async fn keys_with_prefix(&self, prefix: &str) -> DbResult<Vec<String>>;
}

#[async_trait]
impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        (**self).remove(key).await
    }

    async fn keys_with_prefix(&self, prefix: &str) -> DbResult<Vec<String>> {
        (**self).keys_with_prefix(prefix).await
    }
}
