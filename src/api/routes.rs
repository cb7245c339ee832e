use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_context::{make_span_with_request_id, request_context_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_context_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Conversation
        .route("/chat", post(handlers::chat))
        .route("/cold-start", post(handlers::cold_start))
        .route("/synopsis", get(handlers::synopsis))
        .route("/recommendations", get(handlers::recommendations))
        // Watchlist
        .route(
            "/watchlist",
            get(handlers::get_watchlist)
                .post(handlers::add_to_watchlist)
                .delete(handlers::clear_watchlist),
        )
        .route("/watchlist/item", delete(handlers::remove_from_watchlist))
        // History
        .route(
            "/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        // Auth collaborator support
        .route("/auth/error-message", get(handlers::auth_error_message))
}
