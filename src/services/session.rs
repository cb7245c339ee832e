use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult, ModelError},
    models::RecommendationResult,
    services::{
        extractor::extract_json,
        parser::parse_recommendations,
        providers::{GenerateRequest, GenerativeModel, Turn},
        retry::RetryPolicy,
        sources::dedupe_sources,
        translator::{cold_start_message, translate_error},
    },
};

/// Returned by [`ConversationSession::get_synopsis`] when no synopsis could be fetched
pub const SYNOPSIS_UNAVAILABLE: &str = "Synopsis unavailable.";

const MAX_CLARIFYING_QUESTIONS: usize = 3;

/// Most recent user/model exchanges resent with each turn; older ones are dropped
const MAX_HISTORY_EXCHANGES: usize = 20;

/// Behavioural contract bound to the chat when it is created
const SYSTEM_CONTRACT: &str = r#"You are CineSage, a friendly and knowledgeable movie and TV series recommendation assistant.

Always answer with a single JSON object and nothing else: no markdown fences, no prose before or after it. The object has this shape:
{
  "summary": "string, always present: a short conversational reply to the user",
  "clarifyingQuestions": ["optional, at most 3 short questions when the request is vague"],
  "recommendations": [
    {
      "title": "string",
      "year": "release year, or first-last year range for series, e.g. 2008-2013",
      "genres": ["string"],
      "runtime": "e.g. 2h 28m, or 45m/ep for series",
      "rating": "e.g. IMDb: 8.1/10",
      "emotionalTone": "string",
      "reason": "why this matches the request",
      "synopsis": "1-2 sentences",
      "bestSuitedFor": "who or what occasion this suits",
      "trailerUrl": "official YouTube trailer URL, or null if unsure",
      "language": "original language",
      "industry": "e.g. Hollywood, Bollywood, Tollywood, Korean, Japanese",
      "director": "string",
      "specialFeature": "optional notable award, cast or craft detail",
      "type": "movie or series",
      "totalSeasons": "number of seasons, series only"
    }
  ]
}

Rules:
- Greetings and small talk: reply in summary only with an empty recommendations list.
- Vague requests: recommend what you can and ask up to 3 clarifyingQuestions.
- Use web search to verify ratings, release years and whether a series is ongoing.
- Never invent trailer URLs; use null when you cannot find the official trailer.
- Do not repeat titles you already recommended in this conversation unless asked."#;

/// Seed request for the initial, un-prompted batch
const COLD_START_PROMPT: &str = "Give me a diverse starter batch of exactly 6 recommendations: mix movies and series, and cover Hollywood, Indian cinema (Bollywood and regional industries) and international titles across different genres and moods. Use the summary to welcome me and invite me to describe what I feel like watching.";

/// Chat state bound on first use: fixed contract, search tool, and turn history
struct ChatHandle {
    system_instruction: String,
    web_search: bool,
    history: Vec<Turn>,
}

impl ChatHandle {
    fn new() -> Self {
        Self {
            system_instruction: SYSTEM_CONTRACT.to_string(),
            web_search: true,
            history: Vec::new(),
        }
    }

    fn request_for(&self, message: &str) -> GenerateRequest {
        let mut turns = self.history.clone();
        turns.push(Turn::user(message));
        GenerateRequest {
            system_instruction: Some(self.system_instruction.clone()),
            turns,
            web_search: self.web_search,
        }
    }

    fn commit(&mut self, message: String, reply: String) {
        self.history.push(Turn::user(message));
        self.history.push(Turn::model(reply));

        let excess = self.history.len().saturating_sub(MAX_HISTORY_EXCHANGES * 2);
        if excess > 0 {
            self.history.drain(..excess);
        }
    }
}

/// The single ongoing dialogue with the model
///
/// Created once by the composition root and shared by handle. The underlying
/// chat is bound lazily on the first `send` or `cold_start` and then lives for
/// the rest of the process. Turns are serialized through the chat lock since the
/// conversation cannot interleave concurrent turns.
pub struct ConversationSession {
    model: Arc<dyn GenerativeModel>,
    retry: RetryPolicy,
    chat: Mutex<Option<ChatHandle>>,
}

impl ConversationSession {
    pub fn new(model: Arc<dyn GenerativeModel>, retry: RetryPolicy) -> Self {
        Self {
            model,
            retry,
            chat: Mutex::new(None),
        }
    }

    /// Whether the chat has been bound yet
    pub async fn is_initialized(&self) -> bool {
        self.chat.lock().await.is_some()
    }

    /// Fetches the initial recommendation batch shown when a session begins
    ///
    /// Failure is reported as [`AppError::ColdStartFailed`] carrying a localized
    /// message, so the caller can offer a manual retry.
    pub async fn cold_start(&self, language: &str) -> AppResult<RecommendationResult> {
        let message = compose_message(COLD_START_PROMPT, language);

        match self.converse(message).await {
            Ok(result) => {
                tracing::info!(
                    language = %language,
                    recommendations = result.recommendations.len(),
                    "Cold start completed"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, language = %language, "Cold start failed");
                Err(AppError::ColdStartFailed {
                    message: cold_start_message(language).to_string(),
                    retryable: true,
                })
            }
        }
    }

    /// Sends a user query and returns the structured response
    ///
    /// Never fails: model errors become a localized message with no
    /// recommendations.
    pub async fn send(&self, query: &str, language: &str) -> RecommendationResult {
        let message = compose_message(query, language);

        match self.converse(message).await {
            Ok(result) => {
                tracing::info!(
                    language = %language,
                    recommendations = result.recommendations.len(),
                    sources = result.sources.as_ref().map_or(0, Vec::len),
                    "Chat turn completed"
                );
                result
            }
            Err(e) => {
                tracing::error!(error = %e, language = %language, "Chat turn failed");
                RecommendationResult::message(translate_error(&e, language))
            }
        }
    }

    /// One-off synopsis lookup, independent of the conversation
    pub async fn get_synopsis(&self, title: &str, year: &str, language: &str) -> String {
        let prompt = format!(
            "Write a 1-2 sentence synopsis of \"{}\" ({}) in {}. Reply with the synopsis text only, without spoilers.",
            title, year, language
        );

        match self.model.generate(&GenerateRequest::single(prompt)).await {
            Ok(reply) => {
                let synopsis = reply.text.trim();
                if synopsis.is_empty() {
                    SYNOPSIS_UNAVAILABLE.to_string()
                } else {
                    synopsis.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, title = %title, "Synopsis lookup failed");
                SYNOPSIS_UNAVAILABLE.to_string()
            }
        }
    }

    /// Runs one turn on the chat, binding it first if needed
    ///
    /// The turn is only added to the history once the model has replied.
    async fn converse(&self, message: String) -> Result<RecommendationResult, ModelError> {
        let mut chat = self.chat.lock().await;
        let handle = chat.get_or_insert_with(|| {
            tracing::info!(model = self.model.name(), "Binding conversation session");
            ChatHandle::new()
        });

        let request = handle.request_for(&message);
        let model = &self.model;
        let request_ref = &request;
        let reply = self
            .retry
            .execute(move || model.generate(request_ref))
            .await?;

        let mut result = parse_recommendations(extract_json(&reply.text));
        if let Some(questions) = result.clarifying_questions.as_mut() {
            questions.truncate(MAX_CLARIFYING_QUESTIONS);
        }

        let sources = dedupe_sources(reply.citations);
        if !sources.is_empty() {
            result.sources = Some(sources);
        }

        handle.commit(message, reply.text);
        Ok(result)
    }
}

/// Wraps the user text with the per-message language instruction
fn compose_message(query: &str, language: &str) -> String {
    format!(
        "Respond in {language}. Write every natural-language value (summary, clarifyingQuestions, reason, synopsis, emotionalTone, bestSuitedFor, specialFeature) in {language}. \
         Keep all JSON keys, the \"type\" values (\"movie\" or \"series\"), and the title, year, runtime, rating, genres, language, industry, director and trailerUrl values in English.\n\n\
         User query: {query}"
    )
}
