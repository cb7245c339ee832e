use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::{create_redis_client, InMemoryListStore, ListStore, RedisListStore};
use crate::models::RecommendationItem;
use crate::services::providers::{GeminiProvider, GenerativeModel};
use crate::services::retry::RetryPolicy;
use crate::services::{ConversationSession, Library};

/// Shared application state
///
/// Built once at startup; the conversation session it holds is the single
/// chat for this process.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ConversationSession>,
    pub library: Library,
    /// Latest non-empty recommendation batch, served to the filter endpoint
    pub current: Arc<RwLock<Vec<RecommendationItem>>>,
}

impl AppState {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        store: Arc<dyn ListStore>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            session: Arc::new(ConversationSession::new(model, retry)),
            library: Library::new(store),
            current: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Wires the Gemini backend and the configured list store
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let model = GeminiProvider::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let store: Arc<dyn ListStore> = match &config.redis_url {
            Some(url) => Arc::new(RedisListStore::new(create_redis_client(url)?)),
            None => {
                tracing::warn!("REDIS_URL not set, watchlist and history are kept in memory");
                Arc::new(InMemoryListStore::new())
            }
        };

        tracing::info!(
            model = %config.gemini_model,
            store = store.name(),
            max_retries = config.max_retries,
            "Application state initialized"
        );

        Ok(Self::new(Arc::new(model), store, config.retry_policy()))
    }

    /// Replaces the current set when a turn produced recommendations
    pub async fn track_recommendations(&self, items: &[RecommendationItem]) {
        if !items.is_empty() {
            *self.current.write().await = items.to_vec();
        }
    }
}
