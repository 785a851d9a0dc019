/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config load -> build dependencies -> assemble the Router
 * - Apply middleware (CORS / request id / trace)
 * - Start with axum::serve()
 */
use std::{panic, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health};
use crate::config::Config;
use crate::middleware;
use crate::services::{
    GameService,
    auth::{ClientCredentials, TokenCache, TwitchAuthClient},
    catalog::IgdbClient,
};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,igdb_proxy=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    // Handler panics are turned into 500s by the catch-panic layer; the hook only records them.
    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook();

    tracing::info!(
        "starting IGDB proxy in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!("listening on http://{}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    // One HTTP connection pool shared by both upstreams.
    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let auth = Arc::new(TwitchAuthClient::new(http.clone(), config.token_url.clone()));
    let credentials = ClientCredentials {
        client_id: config.twitch_client_id.clone(),
        client_secret: config.twitch_client_secret.clone(),
    };
    let tokens = TokenCache::new(auth, credentials);

    let catalog = Arc::new(IgdbClient::new(
        http,
        &config.catalog_url,
        config.twitch_client_id.clone(),
    ));

    Ok(AppState::new(Arc::new(GameService::new(tokens, catalog))))
}

pub(crate) fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes())
        .with_state(state);

    let router = middleware::http::apply(router);
    middleware::cors::apply(router, config)
}
