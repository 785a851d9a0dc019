//! IGDB catalog client.
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::services::catalog::types::RawCatalogRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog rejected the query: {status} {body}")]
    Rejected { status: u16, body: String },
    #[error("catalog request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid catalog response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl CatalogError {
    /// The upstream refused our bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

#[async_trait]
pub trait CatalogClient: Send + Sync + 'static {
    /// Run one query against the games endpoint.
    async fn query(&self, query: &str, token: &str) -> Result<Vec<RawCatalogRecord>, CatalogError>;
}

#[derive(Clone, Debug)]
pub struct IgdbClient {
    http: reqwest::Client,
    games_url: String,
    client_id: String,
}

impl IgdbClient {
    /// `base_url` is the API root, e.g. `https://api.igdb.com/v4`.
    pub fn new(http: reqwest::Client, base_url: &Url, client_id: impl Into<String>) -> Self {
        Self {
            http,
            games_url: format!("{}/games", base_url.as_str().trim_end_matches('/')),
            client_id: client_id.into(),
        }
    }
}

#[async_trait]
impl CatalogClient for IgdbClient {
    async fn query(&self, query: &str, token: &str) -> Result<Vec<RawCatalogRecord>, CatalogError> {
        let resp = self
            .http
            .post(&self.games_url)
            .header("Client-ID", &self.client_id)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(query.to_owned())
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Vec<RawCatalogRecord>>()
            .await
            .map_err(CatalogError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> IgdbClient {
        let base = Url::parse(&format!("{}/v4/", server.url())).unwrap();
        IgdbClient::new(reqwest::Client::new(), &base, "my-client")
    }

    #[tokio::test]
    async fn posts_query_with_client_id_and_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v4/games")
            .match_header("client-id", "my-client")
            .match_header("authorization", "Bearer tok")
            .match_header("content-type", "text/plain")
            .match_body("fields name; limit 1;")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "name": "Foo", "total_rating": 87, "cover": {"image_id": "abc"}}]"#)
            .create_async()
            .await;

        let records = client_for(&server)
            .query("fields name; limit 1;", "tok")
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Foo");
        assert_eq!(records[0].total_rating, Some(87.0));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_rejected_with_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v4/games")
            .with_status(401)
            .with_body(r#"{"message":"Authorization Failure"}"#)
            .create_async()
            .await;

        let err = client_for(&server).query("fields *;", "expired").await.unwrap_err();

        assert!(err.is_unauthorized());
        match err {
            CatalogError::Rejected { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Authorization Failure"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_payload_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v4/games")
            .with_status(200)
            .with_body(r#"{"not": "a list"}"#)
            .create_async()
            .await;

        let err = client_for(&server).query("fields *;", "tok").await.unwrap_err();

        assert!(matches!(err, CatalogError::Decode(_)));
        assert!(!err.is_unauthorized());
    }
}
