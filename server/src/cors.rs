//! Cross-origin policy assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The origin allow-list is assembled once at startup from a fixed pair of
//! local development origins plus the deployed CDN origin, then handed to
//! tower-http for enforcement. Nothing here is re-evaluated per request.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origins used by local development servers.
const LOCAL_DEV_ORIGINS: [&str; 2] = ["http://localhost:5000", "https://localhost:5001"];

/// Scheme prefix applied to the configured CDN host.
const CDN_SCHEME: &str = "https://";

/// Assemble the ordered origin allow-list.
///
/// The CDN entry is the raw concatenation of the scheme prefix and the
/// configured host, so an empty host yields the literal `"https://"`. That
/// entry is dropped with a warning at registration time rather than here.
#[must_use]
pub fn allowed_origins(deploy_cdn: &str) -> Vec<String> {
    let mut origins: Vec<String> = LOCAL_DEV_ORIGINS.iter().map(|o| (*o).to_owned()).collect();
    origins.push(format!("{CDN_SCHEME}{deploy_cdn}"));
    origins
}

/// An origin is registrable when a non-empty host follows the scheme.
#[must_use]
pub fn is_registrable_origin(origin: &str) -> bool {
    origin
        .split_once("://")
        .is_some_and(|(scheme, host)| !scheme.is_empty() && !host.is_empty())
}

/// Build the CORS layer registered on the API router: credentialed requests
/// with `Content-Type` and `Authorization` headers from the assembled
/// allow-list. Malformed entries are skipped, not fatal.
#[must_use]
pub fn cors_layer(deploy_cdn: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins(deploy_cdn)
        .into_iter()
        .filter(|origin| {
            if is_registrable_origin(origin) {
                return true;
            }
            tracing::warn!(%origin, "skipping malformed CORS origin");
            false
        })
        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod tests;
