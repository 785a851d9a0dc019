/*
 * Responsibility
 * - URL structure under /api
 *   - GET /api/games?search=...
 *   - GET /api/latest-releases
 */
use axum::{Router, routing::get};

use crate::api::handlers::games::{latest_releases, search_games};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(search_games))
        .route("/latest-releases", get(latest_releases))
}
