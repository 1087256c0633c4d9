//! Key-value persistence port and the in-memory implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Error returned by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage at {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage at {} does not hold a JSON object", .0.display())]
    NotAnObject(PathBuf),
    /// Failure reported by a host-provided store.
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Async key-value storage, the shape of a browser extension's local storage.
///
/// Values are JSON; a missing key reads as `None`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Reads several keys. Stores that can should answer from one snapshot.
    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<Value>>, StoreError> {
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            out.push(self.get(key).await?);
        }
        Ok(out)
    }

    /// Writes several keys. Stores that can should make them visible together.
    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(&key, value).await?;
        }
        Ok(())
    }
}

/// Process-local store. Used by tests and by embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<Value>>, StoreError> {
        let entries = self.entries.read().await;
        Ok(keys.iter().map(|k| entries.get(*k).cloned()).collect())
    }

    async fn set_many(&self, new_entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        self.entries.write().await.extend(new_entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_get_set() {
        let store = MemoryStore::new();
        assert!(store.get("k").await.unwrap().is_none());
        store.set("k", json!([1, 2])).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!([1, 2])));
        store.set("k", json!(false)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!(false)));
    }

    #[tokio::test]
    async fn memory_store_batches() {
        let store = MemoryStore::new();
        store
            .set_many(vec![("a".to_string(), json!(1)), ("b".to_string(), json!(true))])
            .await
            .unwrap();
        assert_eq!(
            store.get_many(&["b", "missing", "a"]).await.unwrap(),
            vec![Some(json!(true)), None, Some(json!(1))]
        );
    }

    /// Only the required methods, so the batch defaults are used.
    struct SingleKeyStore(MemoryStore);

    #[async_trait]
    impl KeyValueStore for SingleKeyStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
            self.0.set(key, value).await
        }
    }

    #[tokio::test]
    async fn default_batches_fall_back_to_single_keys() {
        let store = SingleKeyStore(MemoryStore::new());
        store
            .set_many(vec![("x".to_string(), json!("one")), ("y".to_string(), json!(2))])
            .await
            .unwrap();
        assert_eq!(store.get("x").await.unwrap(), Some(json!("one")));
        assert_eq!(
            store.get_many(&["y", "x"]).await.unwrap(),
            vec![Some(json!(2)), Some(json!("one"))]
        );
    }
}
