use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{AppId, Game, Profile, TagStats, TagVector},
    services::{
        filtering::{self, GameFilters},
        profile,
        recommendations::{self, RecommendationOptions},
    },
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Opaque account record from the identity provider, passed through
    pub account: Value,
    pub tags: TagVector,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub profiles: Vec<Profile>,
    pub options: RecommendationOptions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredGamesRequest {
    #[serde(default)]
    pub app_ids: Vec<AppId>,
    #[serde(default)]
    pub filters: GameFilters,
    #[serde(default)]
    pub start_index: usize,
    #[serde(default)]
    pub max_count: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Builds a taste profile from an external account handle
pub async fn generate_profile(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<Json<ProfileResponse>> {
    let (account, profile) =
        profile::build_profile_from_handle(state.catalog.as_ref(), state.players.as_ref(), &handle)
            .await?;

    Ok(Json(ProfileResponse {
        account,
        tags: profile.tags,
    }))
}

/// Generates group recommendations for a set of profiles
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<AppId>>> {
    tracing::info!(
        request_id = %request_id,
        profile_count = request.profiles.len(),
        clustering = request.options.clustering,
        "Processing recommendation request"
    );

    let recommended = recommendations::recommend_for_group(
        state.catalog.as_ref(),
        &request.profiles,
        request.options,
    )
    .await?;

    Ok(Json(recommended))
}

/// Fetches one game record
pub async fn get_game(
    State(state): State<AppState>,
    Path(app_id): Path<AppId>,
) -> AppResult<Json<Game>> {
    Ok(Json(state.catalog.get_game(app_id).await?))
}

/// Fetches several game records by id
pub async fn get_games_batch(
    State(state): State<AppState>,
    Json(app_ids): Json<Vec<AppId>>,
) -> AppResult<Json<Vec<Game>>> {
    let mut games = Vec::with_capacity(app_ids.len());
    for app_id in app_ids {
        games.push(state.catalog.get_game(app_id).await?);
    }
    Ok(Json(games))
}

/// Filtered, paged game listing
pub async fn get_games_filtered(
    State(state): State<AppState>,
    Json(request): Json<FilteredGamesRequest>,
) -> AppResult<Json<Vec<Game>>> {
    let max_count = request.max_count.unwrap_or(request.app_ids.len());
    let games = filtering::filter_games(
        state.catalog.as_ref(),
        &request.app_ids,
        &request.filters,
        request.start_index,
        max_count,
    )
    .await?;
    Ok(Json(games))
}

/// All known tags ordered by descending catalog frequency
pub async fn get_tags(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.tag_stats().tags_by_frequency())
}

/// The catalog-wide tag statistics record
pub async fn get_tag_stats(State(state): State<AppState>) -> Json<TagStats> {
    Json(state.catalog.tag_stats().as_ref().clone())
}
