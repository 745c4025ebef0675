use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Profiles
        .route("/profiles/:handle", get(handlers::generate_profile))
        // Group recommendations
        .route("/recommendations", post(handlers::recommend))
        // Catalog access
        .route("/games/:app_id", get(handlers::get_game))
        .route("/games", post(handlers::get_games_batch))
        .route("/games/filtered", post(handlers::get_games_filtered))
        .route("/tags", get(handlers::get_tags))
        .route("/tag-stats", get(handlers::get_tag_stats))
}
