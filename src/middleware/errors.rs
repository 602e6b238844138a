//! Error boundary.
//!
//! Handlers and the access gate return `AppError`, whose `IntoResponse` only tags the
//! response. This layer knows the request path, so it renders the final JSON body.
//! Panics anywhere below become an `AppError::Internal` first, so clients always get
//! the structured 500 body instead of a dropped connection.

use std::any::Any;

use axum::{
    Router,
    extract::{OriginalUri, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

/// Wrap `router` (gate included) with the panic guard and the error renderer.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(render_errors))
}

async fn render_errors(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
    next: Next,
) -> Response {
    let path = original_uri.path().to_owned();
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<AppError>() {
        Some(err) => err.into_response_for(&path),
        None => response,
    }
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "non-string panic payload".to_string()
    };

    AppError::internal(format!("panic: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{StatusCode, header},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::error::{DomainError, ErrorResponse, INTERNAL_ERROR_MESSAGE};

    async fn ok() -> &'static str {
        "fine"
    }

    async fn conflict() -> Result<&'static str, AppError> {
        Err(DomainError::conflict("Order 7 already exists").into())
    }

    async fn explode() -> &'static str {
        panic!("secret detail: 10.0.0.3")
    }

    fn app() -> Router {
        apply(
            Router::new()
                .route("/ok", get(ok))
                .route("/orders", get(conflict))
                .route("/explode", get(explode)),
        )
    }

    async fn send(uri: &str) -> Response {
        app()
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn error_body(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn successful_responses_pass_through() {
        let response = send("/ok").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"fine");
    }

    #[tokio::test]
    async fn domain_errors_are_rendered_with_path() {
        let response = send("/orders?page=2").await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = error_body(response).await;
        assert_eq!(body.status, 409);
        assert_eq!(body.error, "Conflict");
        assert_eq!(body.message, "Order 7 already exists");
        assert_eq!(body.path, "/orders");
    }

    #[tokio::test]
    async fn panics_become_generic_500() {
        let response = send("/explode").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = error_body(response).await;
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
        assert_eq!(body.path, "/explode");
    }

    #[test]
    fn panic_payloads_are_tagged_as_internal() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            response.extensions().get::<AppError>(),
            Some(AppError::Internal(detail)) if detail == "panic: boom"
        ));
    }
}
