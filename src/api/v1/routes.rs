/*
 * Responsibility
 * - URL layout of v1 (nested under /api/v1 by app.rs)
 * - Everything here sits behind the access gate; public routes are mounted in app.rs
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{fallback::method_not_allowed, me::me};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .method_not_allowed_fallback(method_not_allowed)
}
