/*
 * Responsibility
 * - Router fallbacks: unknown endpoints become a 404 domain error,
 *   known paths hit with an unsupported method a 405
 * - Runs behind the gate, so unauthenticated callers still get 401 first
 */
use axum::extract::OriginalUri;
use axum::http::{Method, StatusCode, Uri};

use crate::error::{AppError, DomainError};

pub async fn not_found(method: Method, uri: Uri) -> AppError {
    DomainError::not_found(format!("No endpoint {} {}.", method, uri.path())).into()
}

// OriginalUri: nested routers only see the stripped path
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    DomainError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        format!("Method {} is not supported for {}.", method, uri.path()),
    )
    .into()
}
