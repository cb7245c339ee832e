use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    db::{ListStore, StoreKey},
    error::{AppError, AppResult},
    models::{HistoryEntry, RecommendationItem, WatchlistEntry},
};

/// Most recent queries kept per user
pub const MAX_HISTORY: usize = 20;

/// Per-user watchlist and search history on top of a [`ListStore`]
///
/// Each operation reads the whole list, updates it and writes it back, so two
/// concurrent writes for the same user can race; the last write wins.
#[derive(Clone)]
pub struct Library {
    store: Arc<dyn ListStore>,
}

impl Library {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    pub async fn watchlist(&self, user: &str) -> AppResult<Vec<WatchlistEntry>> {
        self.load(&StoreKey::Watchlist(user.to_string())).await
    }

    /// Adds an item unless the same title and year is already saved
    ///
    /// Returns whether the item was added.
    pub async fn add_to_watchlist(&self, user: &str, item: RecommendationItem) -> AppResult<bool> {
        let key = StoreKey::Watchlist(user.to_string());
        let mut entries: Vec<WatchlistEntry> = self.load(&key).await?;

        if entries
            .iter()
            .any(|entry| entry.is_same_title(&item.title, &item.year))
        {
            tracing::debug!(user = %user, title = %item.title, "Already on watchlist");
            return Ok(false);
        }

        tracing::info!(user = %user, title = %item.title, "Added to watchlist");
        entries.push(WatchlistEntry::new(item));
        self.save(&key, &entries).await?;
        Ok(true)
    }

    /// Returns whether anything was removed
    pub async fn remove_from_watchlist(&self, user: &str, title: &str, year: &str) -> AppResult<bool> {
        let key = StoreKey::Watchlist(user.to_string());
        let mut entries: Vec<WatchlistEntry> = self.load(&key).await?;

        let before = entries.len();
        entries.retain(|entry| !entry.is_same_title(title, year));
        if entries.len() == before {
            return Ok(false);
        }

        self.save(&key, &entries).await?;
        Ok(true)
    }

    pub async fn clear_watchlist(&self, user: &str) -> AppResult<()> {
        self.store
            .remove(&StoreKey::Watchlist(user.to_string()))
            .await
    }

    /// Newest first
    pub async fn history(&self, user: &str) -> AppResult<Vec<HistoryEntry>> {
        self.load(&StoreKey::History(user.to_string())).await
    }

    /// Records a query at the front of the history
    ///
    /// A repeat of an earlier query (ignoring case and surrounding whitespace)
    /// moves to the front instead of appearing twice. Blank queries are ignored.
    pub async fn record_query(&self, user: &str, query: &str, language: &str) -> AppResult<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }

        let key = StoreKey::History(user.to_string());
        let mut entries: Vec<HistoryEntry> = self.load(&key).await?;

        let dedup_key = HistoryEntry::dedup_key(query);
        entries.retain(|entry| HistoryEntry::dedup_key(&entry.query) != dedup_key);
        entries.insert(0, HistoryEntry::new(query, language));
        entries.truncate(MAX_HISTORY);

        self.save(&key, &entries).await
    }

    pub async fn clear_history(&self, user: &str) -> AppResult<()> {
        self.store.remove(&StoreKey::History(user.to_string())).await
    }

    async fn load<T: DeserializeOwned>(&self, key: &StoreKey) -> AppResult<Vec<T>> {
        let raw = self.store.get_list(key).await?;
        let mut entries = Vec::with_capacity(raw.len());

        for value in raw {
            match serde_json::from_value(value) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, store = self.store.name(), "Skipping unreadable entry");
                }
            }
        }

        Ok(entries)
    }

    async fn save<T: Serialize>(&self, key: &StoreKey, entries: &[T]) -> AppResult<()> {
        let values = entries
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| AppError::Internal(format!("Store serialization error: {}", e)))?;
        self.store.set_list(key, values).await
    }
}
