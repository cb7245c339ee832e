use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_context::RequestContext;
use crate::models::{HistoryEntry, RecommendationItem, RecommendationResult, WatchlistEntry};
use crate::services::filters::RecommendationFilter;
use crate::services::translator::auth_message;

use super::AppState;

fn default_language() -> String {
    "English".to_string()
}

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct ColdStartRequest {
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct SynopsisQuery {
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct SynopsisResponse {
    pub synopsis: String,
}

#[derive(Debug, Deserialize)]
pub struct WatchlistItemQuery {
    pub title: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthErrorQuery {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Sends a chat turn to the conversation session
pub async fn chat(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<RecommendationResult>> {
    if request.query.trim().is_empty() {
        return Err(AppError::InvalidInput("Query cannot be empty".to_string()));
    }

    tracing::info!(
        request_id = %context.request_id,
        language = %request.language,
        "Processing chat request"
    );

    if let Err(e) = state
        .library
        .record_query(&context.user_id, &request.query, &request.language)
        .await
    {
        tracing::warn!(request_id = %context.request_id, error = %e, "Failed to record history");
    }

    let result = state.session.send(&request.query, &request.language).await;
    state.track_recommendations(&result.recommendations).await;

    Ok(Json(result))
}

/// Fetches the initial recommendation batch
pub async fn cold_start(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Json(request): Json<ColdStartRequest>,
) -> AppResult<Json<RecommendationResult>> {
    tracing::info!(
        request_id = %context.request_id,
        language = %request.language,
        "Processing cold start request"
    );

    let result = state.session.cold_start(&request.language).await?;
    state.track_recommendations(&result.recommendations).await;

    Ok(Json(result))
}

/// One-off synopsis for a title
pub async fn synopsis(
    State(state): State<AppState>,
    Query(params): Query<SynopsisQuery>,
) -> AppResult<Json<SynopsisResponse>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    let synopsis = state
        .session
        .get_synopsis(params.title.trim(), params.year.trim(), &params.language)
        .await;

    Ok(Json(SynopsisResponse { synopsis }))
}

/// Current recommendation set, filtered and sorted
pub async fn recommendations(
    State(state): State<AppState>,
    Query(filter): Query<RecommendationFilter>,
) -> Json<Vec<RecommendationItem>> {
    let current = state.current.read().await;
    Json(filter.apply(&current))
}

pub async fn get_watchlist(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
) -> AppResult<Json<Vec<WatchlistEntry>>> {
    Ok(Json(state.library.watchlist(&context.user_id).await?))
}

/// Adds an item; 201 when added, 200 when it was already saved
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Json(item): Json<RecommendationItem>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let added = state.library.add_to_watchlist(&context.user_id, item).await?;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(json!({ "added": added }))))
}

pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Query(params): Query<WatchlistItemQuery>,
) -> AppResult<StatusCode> {
    let removed = state
        .library
        .remove_from_watchlist(&context.user_id, &params.title, &params.year)
        .await?;

    Ok(if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    })
}

pub async fn clear_watchlist(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
) -> AppResult<StatusCode> {
    state.library.clear_watchlist(&context.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_history(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    Ok(Json(state.library.history(&context.user_id).await?))
}

pub async fn clear_history(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
) -> AppResult<StatusCode> {
    state.library.clear_history(&context.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Localized text for an auth provider error code
pub async fn auth_error_message(Query(params): Query<AuthErrorQuery>) -> Json<Value> {
    Json(json!({ "message": auth_message(&params.code, &params.language) }))
}
