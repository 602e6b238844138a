/*
 * Responsibility
 * - Application-wide error types (DomainError, AppError)
 * - The wire error body (ErrorResponse) and the variant -> status/body mapping
 * - IntoResponse: tags the response with the error; middleware::errors renders it with the request path
 */
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "JWT token is missing or invalid!";
pub const INVALID_CREDENTIAL_MESSAGE: &str = "Invalid JWT token!";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON error body returned to clients.
///
/// ```json
/// {
///   "timestamp": "2025-07-01T16:30:25.123",
///   "status": 404,
///   "error": "Not Found",
///   "message": "User with id 10 not found",
///   "path": "/api/users/10"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: NaiveDateTime,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorResponse {
    fn new(status: StatusCode, message: impl Into<String>, path: &str) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
            path: path.to_string(),
        }
    }

    /// Status and message come straight from the domain error.
    pub fn from_domain(err: &DomainError, path: &str) -> (StatusCode, Self) {
        (err.status, Self::new(err.status, err.message.clone(), path))
    }

    /// Generic 500; the real cause never reaches the client.
    pub fn unexpected(path: &str) -> (StatusCode, Self) {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, Self::new(status, INTERNAL_ERROR_MESSAGE, path))
    }
}

/// Failure raised by business logic: message, HTTP status and a machine-readable code.
///
/// The message is sent to the client verbatim, so only put client-safe text in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct DomainError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl DomainError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// No `Authorization: Bearer ...` header.
    #[error("bearer credential is missing or malformed")]
    MissingCredential,
    /// A bearer token was presented but did not verify.
    #[error("bearer credential failed verification")]
    InvalidCredential,
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Anything unanticipated. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(detail: impl fmt::Display) -> Self {
        Self::Internal(detail.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredential => StatusCode::FORBIDDEN,
            AppError::Domain(err) => err.status(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map this error to the status and body sent for a request to `path`.
    pub fn translate(&self, path: &str) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::MissingCredential => ErrorResponse::from_domain(
                &DomainError::new(
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    MISSING_CREDENTIAL_MESSAGE,
                ),
                path,
            ),
            AppError::InvalidCredential => ErrorResponse::from_domain(
                &DomainError::new(
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    INVALID_CREDENTIAL_MESSAGE,
                ),
                path,
            ),
            AppError::Domain(err) => {
                tracing::debug!(
                    status = err.status().as_u16(),
                    code = err.code(),
                    path,
                    "domain error"
                );
                ErrorResponse::from_domain(err, path)
            }
            AppError::Internal(detail) => {
                tracing::error!(path, error = %detail, "internal server error");
                ErrorResponse::unexpected(path)
            }
        }
    }

    pub fn into_response_for(self, path: &str) -> Response {
        let (status, body) = self.translate(path);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The request path is unknown here; the error boundary layer renders the body.
        let mut response = self.status().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_passes_status_and_message_through() {
        let err = DomainError::not_found("User with id 10 not found");
        let (status, body) = ErrorResponse::from_domain(&err, "/api/users/10");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "User with id 10 not found");
        assert_eq!(body.path, "/api/users/10");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = DomainError::bad_request("page must be positive");
        assert_eq!(err.code(), "BAD_REQUEST");

        let (status, body) = ErrorResponse::from_domain(&err, "/orders");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "page must be positive");
    }

    #[test]
    fn custom_domain_error_keeps_its_code() {
        let err = DomainError::new(StatusCode::UNPROCESSABLE_ENTITY, "ORDER_LOCKED", "locked");
        assert_eq!(err.code(), "ORDER_LOCKED");
        assert_eq!(err.to_string(), "ORDER_LOCKED: locked");

        let (status, body) = AppError::from(err).translate("/orders/1");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, "Unprocessable Entity");
        assert_eq!(body.message, "locked");
    }

    #[test]
    fn internal_error_hides_detail() {
        let err = AppError::internal("connection refused: db-primary:5432");
        let (status, body) = err.translate("/orders/5");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
        assert!(!body.message.contains("db-primary"));
    }

    #[test]
    fn anyhow_errors_become_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal(ref d) if d == "boom"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn credential_failures_map_to_401_and_403() {
        let (status, body) = AppError::MissingCredential.translate("/orders/5");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "Unauthorized");
        assert_eq!(body.message, MISSING_CREDENTIAL_MESSAGE);

        let (status, body) = AppError::InvalidCredential.translate("/orders/5");
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error, "Forbidden");
        assert_eq!(body.message, INVALID_CREDENTIAL_MESSAGE);
    }

    #[test]
    fn into_response_tags_the_error() {
        let response = AppError::Domain(DomainError::conflict("already exists")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let tagged = response.extensions().get::<AppError>().unwrap();
        assert!(matches!(tagged, AppError::Domain(e) if e.message() == "already exists"));
    }

    #[test]
    fn body_serializes_with_wire_field_names() {
        let (_, body) = ErrorResponse::unexpected("/x");
        let json = serde_json::to_value(&body).unwrap();
        let obj = json.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["error", "message", "path", "status", "timestamp"]);

        // ISO-8601 local date-time, no offset
        let ts = obj["timestamp"].as_str().unwrap();
        assert!(NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }
}
