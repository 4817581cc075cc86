use axum::{
    extract::{Request, State},
    http::{header, HeaderName, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::error::AppError;
use crate::config::Environment;

const ALLOWED_ORIGINS: [&str; 7] = [
    "https://www.satvikyoga.nl",
    "https://satvikyoga.nl",
    "https://satvikyogaui.vercel.app",
    "https://satvikyogaui.vercel.app/",
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:5174",
];

/// Preview and production deployments of the front-end live under this domain.
const TRUSTED_PLATFORM_DOMAIN: &str = "vercel.app";

/// Decides whether a request carrying `origin` may reach the API.
///
/// Requests without an origin (curl, mobile apps) are always allowed, and so is every
/// origin outside production.
pub fn origin_allowed(origin: Option<&str>, environment: Environment) -> bool {
    let Some(origin) = origin.filter(|origin| !origin.is_empty()) else {
        return true;
    };

    if environment != Environment::Production {
        return true;
    }

    ALLOWED_ORIGINS.contains(&origin) || on_trusted_platform(origin)
}

fn on_trusted_platform(origin: &str) -> bool {
    let Ok(uri) = origin.parse::<axum::http::Uri>() else {
        return false;
    };

    uri.host().is_some_and(|host| {
        host == TRUSTED_PLATFORM_DOMAIN
            || host
                .strip_suffix(TRUSTED_PLATFORM_DOMAIN)
                .is_some_and(|subdomain| subdomain.ends_with('.'))
    })
}

/// Rejects requests from disallowed origins before they are routed, preflights included.
pub async fn guard_origin(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    {
        // Undecodable bytes become U+FFFD, which never matches a listed or trusted origin.
        let origin = request
            .headers()
            .get(header::ORIGIN)
            .map(|value| String::from_utf8_lossy(value.as_bytes()));
        let origin = origin.as_deref();

        if !origin_allowed(origin, environment) {
            tracing::warn!(?origin, %environment, "origin blocked");
            return Err(AppError::OriginRejected);
        }
        tracing::debug!(?origin, %environment, "origin allowed");
    }

    Ok(next.run(request).await)
}

/// Response headers for requests that passed [`guard_origin`]. The request origin is
/// echoed back so that credentials can be allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
}
