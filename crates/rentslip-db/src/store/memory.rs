//! In-memory [`KeyValueStore`], for tests and throwaway sessions.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::error::DbResult;

/// A `BTreeMap` behind a tokio `RwLock`. Never fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when no keys are held.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> DbResult<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("draft").await.unwrap(), None);

        store.set("draft", "{}").await.unwrap();
        store.set("draft", "{\"a\":1}").await.unwrap();
        assert_eq!(store.get("draft").await.unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(store.len().await, 1);

        store.remove("draft").await.unwrap();
        store.remove("draft").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_keys_with_prefix() {
        let store = MemoryStore::new();
        for key in ["receipt_counter_2025", "receipts", "receipt_counter_2024", "draft"] {
            store.set(key, "1").await.unwrap();
        }

        let keys = store.keys_with_prefix("receipt_counter_").await.unwrap();
        assert_eq!(keys, vec!["receipt_counter_2024", "receipt_counter_2025"]);
        assert!(store.keys_with_prefix("zzz").await.unwrap().is_empty());
    }
}
