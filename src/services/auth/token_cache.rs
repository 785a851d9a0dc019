/*
 * Responsibility
 * - Hold the single app access token (value + expiry) for the whole process
 * - Return the cached token while it is valid, otherwise run the client-credentials exchange
 * - The 60s safety margin is applied when the token is stored, not when it is checked
 */
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::services::auth::client::{AuthClient, AuthError, ClientCredentials};

/// Seconds subtracted from the advertised lifetime when a token is stored.
pub const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-memory token cache shared by all requests.
///
/// NOTE:
/// - The lock is only held to read or replace the slot, never across the upstream call.
///   Concurrent misses each run their own exchange and the last write wins. Every result is a
///   valid token, so the race costs extra round trips, not correctness.
pub struct TokenCache {
    auth: Arc<dyn AuthClient>,
    credentials: ClientCredentials,
    slot: RwLock<Option<AccessToken>>,
}

impl TokenCache {
    pub fn new(auth: Arc<dyn AuthClient>, credentials: ClientCredentials) -> Self {
        Self {
            auth,
            credentials,
            slot: RwLock::new(None),
        }
    }

    pub async fn get_token(&self) -> Result<AccessToken, AuthError> {
        self.get_token_at(Utc::now()).await
    }

    pub async fn get_token_at(&self, now: DateTime<Utc>) -> Result<AccessToken, AuthError> {
        if let Some(token) = self.slot.read().await.as_ref()
            && token.is_valid_at(now)
        {
            return Ok(token.clone());
        }

        let fetched = self.auth.fetch_token(&self.credentials).await?;
        let lifetime =
            Duration::try_seconds(fetched.expires_in.saturating_sub(EXPIRY_MARGIN_SECONDS))
                .unwrap_or_else(Duration::zero);
        let token = AccessToken {
            value: fetched.access_token,
            // An unrepresentable expiry leaves the token already stale.
            expires_at: now.checked_add_signed(lifetime).unwrap_or(now),
        };
        info!(
            expires_in = fetched.expires_in,
            expires_at = %token.expires_at,
            "obtained new catalog access token"
        );

        *self.slot.write().await = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next `get_token` performs a fresh exchange.
    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }
}
