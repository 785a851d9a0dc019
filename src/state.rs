/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - the game service, which owns the process-wide token cache
 * - Cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::GameService;

#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameService>,
}

impl AppState {
    pub fn new(games: Arc<GameService>) -> Self {
        Self { games }
    }
}
