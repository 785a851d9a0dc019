/*
 * Responsibility
 * - Compose token cache -> catalog query -> ranking -> mapping for the two listings
 * - No retries: upstream failures go straight back to the handler as AppError
 */
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::services::auth::TokenCache;
use crate::services::catalog::{
    CatalogClient, GameSummary, RawCatalogRecord, mapper, query,
    ranker::{self, RankPolicy},
};

pub struct GameService {
    tokens: TokenCache,
    catalog: Arc<dyn CatalogClient>,
}

impl GameService {
    pub fn new(tokens: TokenCache, catalog: Arc<dyn CatalogClient>) -> Self {
        Self { tokens, catalog }
    }

    /// Free-text search. `term` must already be trimmed and non-empty.
    pub async fn search(&self, term: &str) -> Result<Vec<GameSummary>, AppError> {
        let records = self.fetch(&query::search_query(term)).await?;
        debug!(term, raw = records.len(), "catalog search");
        Ok(present(records, RankPolicy::Search))
    }

    /// Well-rated games released in the six months up to `now`.
    pub async fn latest_releases(&self, now: DateTime<Utc>) -> Result<Vec<GameSummary>, AppError> {
        let records = self.fetch(&query::recent_releases_query(now)).await?;
        debug!(raw = records.len(), "catalog latest releases");
        Ok(present(records, RankPolicy::LatestReleases))
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawCatalogRecord>, AppError> {
        let token = self.tokens.get_token().await?;

        match self.catalog.query(query, &token.value).await {
            Ok(records) => Ok(records),
            Err(e) => {
                if e.is_unauthorized() {
                    // Revoked before its advertised expiry; exchange a new one on the next request.
                    warn!("catalog rejected cached token; invalidating");
                    self.tokens.invalidate().await;
                }
                Err(e.into())
            }
        }
    }
}

fn present(records: Vec<RawCatalogRecord>, policy: RankPolicy) -> Vec<GameSummary> {
    ranker::rank(records, policy)
        .into_iter()
        .map(mapper::to_summary)
        .collect()
}
