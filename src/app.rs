/*
 * Responsibility
 * - Load Config → build services → assemble the Router
 * - Apply middleware (access gate, error boundary, CORS, http layers)
 * - Start serving with axum::serve()
 */
use std::panic;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::{
    api_docs::api_docs,
    fallback::{method_not_allowed, not_found},
    health::health,
};
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_verifier;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost".
        // The process keeps running: the error boundary answers the request with a 500.
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook();

    tracing::info!(?config, "starting API in {:?} mode on {}", config.app_env, config.addr);

    let state = AppState::new(build_verifier(&config));
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Full application router.
///
/// Request order: http layers → CORS → error boundary → access gate → handler.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/actuator/health", get(health))
        .route("/v3/api-docs", get(api_docs))
        .nest("/api/v1", api::v1::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found);

    let router = middleware::auth::access::apply(router, state.clone());
    let router = middleware::errors::apply(router).with_state(state);
    let router = middleware::cors::apply(router, config);

    middleware::http::apply(router)
}
