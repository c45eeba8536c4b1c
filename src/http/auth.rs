//! Shared-secret gate for everything under `/products`.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Constant-time comparison of a presented key against the configured one.
pub fn key_matches(presented: &[u8], expected: &[u8]) -> bool {
    presented.ct_eq(expected).into()
}

/// Paths that require the key, matched or not.
pub fn is_protected(path: &str) -> bool {
    path == "/products" || path.starts_with("/products/")
}

/// Reject a `/products` request with 401 unless the configured header carries the secret.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    let auth = &state.config.auth;
    let presented = request.headers().get(auth.header_name.as_str());
    let header_present = presented.is_some();
    let authorized = presented
        .map(|value| key_matches(value.as_bytes(), auth.api_key.as_bytes()))
        .unwrap_or(false);

    if authorized {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        header_present,
        "Rejected request with invalid API key"
    );
    ApiError::Unauthorized.into_response()
}
