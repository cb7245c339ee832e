use serde::{Deserialize, Deserializer, Serialize};

pub mod library;

pub use library::{HistoryEntry, WatchlistEntry};

/// Kind of title being recommended
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Movie,
    Series,
}

impl std::str::FromStr for ContentType {
    type Err = String;

    /// Case-insensitive, accepting the common aliases for series
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "movie" | "film" => Ok(ContentType::Movie),
            "series" | "tv" | "show" | "tv_series" | "tv_show" => Ok(ContentType::Series),
            other => Err(format!("unknown content type: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single recommended movie or series, as returned to the client
///
/// Field names follow the JSON contract shared with the generative model, so the
/// same struct is used both to parse model output and to serialize API responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub title: String,
    /// Single year ("2019") or range ("2008-2013")
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub runtime: String,
    /// Free-form, typically "IMDb: 8.1/10"
    #[serde(default, deserialize_with = "lenient_text")]
    pub rating: String,
    #[serde(default)]
    pub emotional_tone: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub best_suited_for: String,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_feature: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_content_type")]
    pub content_type: ContentType,
    /// Only meaningful for series
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_seasons: Option<u32>,
}

/// A grounding citation attached to a model response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Raw citation as reported by the model backend, before deduplication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationFragment {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// The structured payload produced for every chat turn
///
/// `summary` is always present, including greeting-only turns and degraded
/// error responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarifying_questions: Option<Vec<String>>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

impl RecommendationResult {
    /// Builds a result carrying only a user-facing message
    pub fn message(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            clarifying_questions: None,
            recommendations: Vec::new(),
            sources: None,
        }
    }
}

/// Accepts strings, bare numbers (`"year": 2020`) or null for free-form text fields
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Unrecognised or missing `type` values read as a movie
fn lenient_content_type<'de, D>(deserializer: D) -> Result<ContentType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

/// Accepts `3`, `"3"`, `"3 seasons"` or null for season counts
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

// ============================================================================
// Gemini generateContent API Types
// ============================================================================

/// Request body for POST /v1beta/models/{model}:generateContent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGenerateRequest {
    pub contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<ApiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ApiTool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<ApiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiTool {
    pub google_search: serde_json::Value,
}

/// Response body from generateContent
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGenerateResponse {
    #[serde(default)]
    pub candidates: Vec<ApiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<ApiPromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCandidate {
    #[serde(default)]
    pub content: Option<ApiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub grounding_metadata: Option<ApiGroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<ApiGroundingChunk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGroundingChunk {
    #[serde(default)]
    pub web: Option<ApiWebChunk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiWebChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
