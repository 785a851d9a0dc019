/*
 * Responsibility
 * - GET /api/games?search=... and GET /api/latest-releases
 * - Validate the query string, delegate to GameService, return JSON
 */
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::Utc;

use crate::{
    api::dto::games::SearchParams, error::AppError, services::catalog::GameSummary,
    state::AppState,
};

pub async fn search_games(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<GameSummary>>, AppError> {
    // Malformed query strings get the same JSON error body as a missing term.
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;
    let term = params.validate().map_err(AppError::validation)?;
    let games = state.games.search(term).await?;
    Ok(Json(games))
}

pub async fn latest_releases(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameSummary>>, AppError> {
    let games = state.games.latest_releases(Utc::now()).await?;
    Ok(Json(games))
}
