//! CORS for the browser client this proxy fronts.
//!
//! Allowed origins:
//! - `CORS_ALLOWED_ORIGINS` set and `APP_ENV=production`: exact match against that list
//!   (a `*` entry opens it up).
//! - otherwise: any origin (`*`). Leaving the list empty in production keeps the browser
//!   client working; set it to lock the proxy down.
//!
//! No credentials either way, and only GET plus its preflight.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

pub fn apply(router: Router, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(config))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(PREFLIGHT_MAX_AGE);

    router.layer(cors)
}

fn allowed_origins(config: &Config) -> AllowOrigin {
    if !config.app_env.is_production() {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS is empty; allowing any origin");
        return AllowOrigin::any();
    }
    if origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }

    AllowOrigin::list(origins)
}
