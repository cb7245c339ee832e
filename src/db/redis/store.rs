use redis::AsyncCommands;
use redis::Client;
use serde_json::Value;

use crate::db::store::{ListStore, StoreKey};
use crate::error::{AppError, AppResult};

/// Creates a Redis client for the list store
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed list store; each list is one JSON-encoded string value
#[derive(Clone)]
pub struct RedisListStore {
    redis_client: Client,
}

impl RedisListStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

#[async_trait::async_trait]
impl ListStore for RedisListStore {
    async fn get_list(&self, key: &StoreKey) -> AppResult<Vec<Value>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let stored: Option<String> = conn.get(key.to_string()).await.map_err(|e| {
            tracing::warn!(error = %e, key = %key, "Redis get failed");
            e
        })?;

        match stored {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| AppError::Internal(format!("Store deserialization error: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    async fn set_list(&self, key: &StoreKey, list: Vec<Value>) -> AppResult<()> {
        let json = serde_json::to_string(&list)
            .map_err(|e| AppError::Internal(format!("Store serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key.to_string(), json).await.map_err(|e| {
            tracing::warn!(error = %e, key = %key, "Redis set failed");
            e
        })?;

        tracing::debug!(key = %key, entries = list.len(), "Stored list");
        Ok(())
    }

    async fn remove(&self, key: &StoreKey) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key.to_string()).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

// These tests need a running Redis; set REDIS_URL to point them elsewhere.
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_store() -> RedisListStore {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        RedisListStore::new(create_redis_client(&redis_url).unwrap())
    }

    #[tokio::test]
    #[ignore = "requires a running Redis"]
    async fn test_missing_key_reads_empty() {
        let store = test_store();
        let key = StoreKey::Watchlist("nonexistent_user_12345".to_string());
        assert!(store.get_list(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires a running Redis"]
    async fn test_set_get_remove() {
        let store = test_store();
        let key = StoreKey::History("redis_store_test".to_string());

        store
            .set_list(&key, vec![json!({"query": "noir"})])
            .await
            .unwrap();
        assert_eq!(
            store.get_list(&key).await.unwrap(),
            vec![json!({"query": "noir"})]
        );

        store.remove(&key).await.unwrap();
        assert!(store.get_list(&key).await.unwrap().is_empty());
    }

    #[test]
    fn test_client_rejects_bad_url() {
        assert!(create_redis_client("not a url").is_err());
    }
}
