//! Client-credentials exchange against the Twitch identity provider.
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Errors from the token endpoint.
///
/// Kept separate from `AppError` so the cache can stay HTTP-agnostic; the handler layer
/// decides which status to surface.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity provider rejected the token request: {status} {body}")]
    Rejected { status: u16, body: String },
    #[error("identity provider request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid token response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Token payload returned by the identity provider.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FetchedToken {
    pub access_token: String,
    /// Advertised lifetime in seconds.
    pub expires_in: i64,
}

#[async_trait]
pub trait AuthClient: Send + Sync + 'static {
    async fn fetch_token(&self, credentials: &ClientCredentials) -> Result<FetchedToken, AuthError>;
}

/// reqwest-backed `AuthClient` for `POST /oauth2/token`.
#[derive(Clone, Debug)]
pub struct TwitchAuthClient {
    http: reqwest::Client,
    token_url: Url,
}

impl TwitchAuthClient {
    pub fn new(http: reqwest::Client, token_url: Url) -> Self {
        Self { http, token_url }
    }
}

#[async_trait]
impl AuthClient for TwitchAuthClient {
    async fn fetch_token(&self, credentials: &ClientCredentials) -> Result<FetchedToken, AuthError> {
        // Twitch takes the credentials as query parameters, not a form body.
        let mut url = self.token_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &credentials.client_id)
            .append_pair("client_secret", &credentials.client_secret)
            .append_pair("grant_type", "client_credentials");

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<FetchedToken>().await.map_err(AuthError::Decode)
    }
}
