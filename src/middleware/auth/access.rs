//! Bearer access-token gate → AuthCtx into request extensions
//!
//! Runs once per request, before any handler:
//! 1. public route or pre-flight → forward untouched (no AuthCtx)
//! 2. no `Authorization: Bearer <token>` header → 401
//! 3. token fails verification → 403
//! 4. verified → AuthCtx { sub, [ROLE_<ROLE>] } into extensions → forward
//! 5. verified claims that cannot form a principal → 500
//!
//! Panics below this layer are turned into the same 500 body by `middleware::errors`.

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::{HeaderMap, Method, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::auth::public_routes;
use crate::services::auth::CredentialVerifier;
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// How the gate let a request through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Public route or pre-flight; no principal.
    Bypassed,
    Verified(AuthCtx),
}

/// Apply the gate to every route of `router` (including the fallback).
///
/// Example:
/// ```ignore
/// let router = middleware::auth::access::apply(router, state.clone());
/// let router = middleware::errors::apply(router);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 `from_fn` cannot extract State, so hand it over via `from_fn_with_state`
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let outcome = authenticate(
        state.verifier.as_ref(),
        req.method(),
        original_uri.path(),
        req.headers(),
    )?;

    if let GateOutcome::Verified(auth_ctx) = outcome {
        // middleware → extractor; dropped together with the request
        req.extensions_mut().insert(auth_ctx);
    }

    Ok(next.run(req).await)
}

/// Decide whether a request may proceed, and as whom.
pub fn authenticate(
    verifier: &dyn CredentialVerifier,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<GateOutcome, AppError> {
    tracing::info!(%method, path, "incoming request");

    if public_routes::is_public(path, method) {
        tracing::info!(%method, path, "public route, skipping token validation");
        return Ok(GateOutcome::Bypassed);
    }

    let token = match bearer_token(headers) {
        Some(token) => token,
        None => {
            tracing::warn!(
                path,
                header_present = headers.contains_key(header::AUTHORIZATION),
                "bearer token is missing or malformed"
            );
            return Err(AppError::MissingCredential);
        }
    };

    let claims = match verifier.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(path, reason = err.kind(), error = %err, "access token verification failed");
            return Err(AppError::InvalidCredential);
        }
    };

    // logged at error level by the translator
    let auth_ctx = AuthCtx::from_claims(&claims).map_err(|err| {
        AppError::internal(format!("verified token carries unusable claims: {err}"))
    })?;

    tracing::info!(
        path,
        subject = %auth_ctx.subject,
        authorities = ?auth_ctx.authorities,
        "access token verified"
    );

    Ok(GateOutcome::Verified(auth_ctx))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
}
