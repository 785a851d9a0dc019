/*
 * Responsibility
 * - Load environment variables / .env (PORT, Twitch credentials, CORS, upstream URLs)
 * - Validate values (missing credentials abort startup)
 */
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const DEFAULT_CATALOG_URL: &str = "https://api.igdb.com/v4";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub twitch_client_id: String,
    pub twitch_client_secret: String,

    pub token_url: Url,
    pub catalog_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let twitch_client_id = required(&lookup, "TWITCH_CLIENT_ID")?;
        let twitch_client_secret = required(&lookup, "TWITCH_CLIENT_SECRET")?;

        let token_url = url_or_default(&lookup, "TWITCH_TOKEN_URL", DEFAULT_TOKEN_URL)?;
        let catalog_url = url_or_default(&lookup, "IGDB_API_URL", DEFAULT_CATALOG_URL)?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            twitch_client_id,
            twitch_client_secret,
            token_url,
            catalog_url,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn url_or_default<F>(lookup: &F, key: &'static str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid(key))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = Config::from_lookup(lookup_from(&[
            ("TWITCH_CLIENT_ID", "client"),
            ("TWITCH_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.token_url.as_str(), DEFAULT_TOKEN_URL);
        assert_eq!(config.catalog_url.as_str(), DEFAULT_CATALOG_URL);
    }

    #[test]
    fn missing_credentials_refuse_to_start() {
        let err = Config::from_lookup(lookup_from(&[("TWITCH_CLIENT_SECRET", "secret")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("TWITCH_CLIENT_ID"));

        let err = Config::from_lookup(lookup_from(&[
            ("TWITCH_CLIENT_ID", "client"),
            ("TWITCH_CLIENT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("TWITCH_CLIENT_SECRET"));
    }

    #[test]
    fn reads_port_env_and_origins() {
        let config = Config::from_lookup(lookup_from(&[
            ("TWITCH_CLIENT_ID", "client"),
            ("TWITCH_CLIENT_SECRET", "secret"),
            ("PORT", "8080"),
            ("APP_ENV", "Prod"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn rejects_bad_port_and_urls() {
        let err = Config::from_lookup(lookup_from(&[
            ("TWITCH_CLIENT_ID", "client"),
            ("TWITCH_CLIENT_SECRET", "secret"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));

        let err = Config::from_lookup(lookup_from(&[
            ("TWITCH_CLIENT_ID", "client"),
            ("TWITCH_CLIENT_SECRET", "secret"),
            ("IGDB_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("IGDB_API_URL"));
    }
}
