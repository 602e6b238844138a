/*
 * Responsibility
 * - GET /api/v1/me: echo the principal the gate attached to this request
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(ctx.into())
}
