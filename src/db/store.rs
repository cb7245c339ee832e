use std::collections::HashMap;
use std::fmt::Display;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Watchlist(String),
    History(String),
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::Watchlist(user) => write!(f, "watchlist:{}", user),
            StoreKey::History(user) => write!(f, "history:{}", user),
        }
    }
}

/// Keyed store of JSON lists backing the watchlist and search history
///
/// Each key maps to a whole list that is read and written in one piece; a
/// missing key reads as an empty list.
#[async_trait::async_trait]
pub trait ListStore: Send + Sync {
    async fn get_list(&self, key: &StoreKey) -> AppResult<Vec<Value>>;

    async fn set_list(&self, key: &StoreKey, list: Vec<Value>) -> AppResult<()>;

    async fn remove(&self, key: &StoreKey) -> AppResult<()>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Process-local store, used when no Redis URL is configured
#[derive(Default)]
pub struct InMemoryListStore {
    lists: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ListStore for InMemoryListStore {
    async fn get_list(&self, key: &StoreKey) -> AppResult<Vec<Value>> {
        let lists = self.lists.read().await;
        Ok(lists.get(&key.to_string()).cloned().unwrap_or_default())
    }

    async fn set_list(&self, key: &StoreKey, list: Vec<Value>) -> AppResult<()> {
        self.lists.write().await.insert(key.to_string(), list);
        Ok(())
    }

    async fn remove(&self, key: &StoreKey) -> AppResult<()> {
        self.lists.write().await.remove(&key.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_key_display() {
        assert_eq!(
            StoreKey::Watchlist("guest".to_string()).to_string(),
            "watchlist:guest"
        );
        assert_eq!(StoreKey::History("u1".to_string()).to_string(), "history:u1");
    }

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let store = InMemoryListStore::new();
        let key = StoreKey::Watchlist("guest".to_string());

        assert!(store.get_list(&key).await.unwrap().is_empty());

        store
            .set_list(&key, vec![json!({"title": "Dune"})])
            .await
            .unwrap();
        assert_eq!(store.get_list(&key).await.unwrap(), vec![json!({"title": "Dune"})]);

        store.remove(&key).await.unwrap();
        assert!(store.get_list(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let store = InMemoryListStore::new();
        let watchlist = StoreKey::Watchlist("guest".to_string());
        let history = StoreKey::History("guest".to_string());

        store.set_list(&watchlist, vec![json!(1)]).await.unwrap();
        assert!(store.get_list(&history).await.unwrap().is_empty());
    }
}
