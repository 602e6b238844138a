//! Routes that skip authentication.

use axum::http::Method;

/// Ant-style patterns; a trailing `/**` matches everything below the prefix.
pub const PUBLIC_ROUTES: &[&str] = &[
    "/v3/api-docs/**",
    "/swagger-ui/**",
    "/swagger-ui.html",
    "/actuator/**",
];

/// Whether `path` may be served without a bearer token.
///
/// Pre-flight (`OPTIONS`) requests are always public so CORS negotiation is never
/// blocked by the gate.
pub fn is_public(path: &str, method: &Method) -> bool {
    if method == Method::OPTIONS {
        return true;
    }

    PUBLIC_ROUTES
        .iter()
        .any(|pattern| path.starts_with(pattern.trim_end_matches("/**")))
}
