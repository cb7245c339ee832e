use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecommendationItem;

/// A recommendation saved to the user's watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    #[serde(flatten)]
    pub item: RecommendationItem,
    pub added_at: DateTime<Utc>,
}

impl WatchlistEntry {
    /// Creates an entry stamped with the current time
    pub fn new(item: RecommendationItem) -> Self {
        Self {
            item,
            added_at: Utc::now(),
        }
    }

    /// Whether this entry refers to the given title and year
    ///
    /// Identity is plain string equality on title and year; there is no stable
    /// catalogue ID available for model-generated titles.
    pub fn is_same_title(&self, title: &str, year: &str) -> bool {
        self.item.title == title && self.item.year == year
    }
}

/// A past chat query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub query: String,
    pub language: String,
    pub searched_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
            searched_at: Utc::now(),
        }
    }

    /// Normalized query text used to detect repeated searches
    pub fn dedup_key(query: &str) -> String {
        query.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, year: &str) -> RecommendationItem {
        serde_json::from_value(serde_json::json!({ "title": title, "year": year })).unwrap()
    }

    #[test]
    fn test_watchlist_entry_flattens_item() {
        let entry = WatchlistEntry::new(item("Dark", "2017-2020"));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["title"], "Dark");
        assert_eq!(value["year"], "2017-2020");
        assert!(value.get("addedAt").is_some());

        let back: WatchlistEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_watchlist_identity_is_title_and_year() {
        let entry = WatchlistEntry::new(item("Dune", "2021"));
        assert!(entry.is_same_title("Dune", "2021"));
        assert!(!entry.is_same_title("Dune", "1984"));
        assert!(!entry.is_same_title("dune", "2021"));
    }

    #[test]
    fn test_history_dedup_key() {
        assert_eq!(
            HistoryEntry::dedup_key("  Gritty Crime DRAMA "),
            "gritty crime drama"
        );
    }
}
