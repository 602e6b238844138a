/*
 * Responsibility
 * - GET /v3/api-docs: OpenAPI 3 document for API tooling
 * - Declares the `Bearer` (JWT) security scheme applied to every operation
 * - Public: everything under the `/v3/api-docs` prefix skips the gate
 */
use axum::Json;
use serde_json::{Value, json};

const SECURITY_SCHEME_NAME: &str = "Bearer";

pub async fn api_docs() -> Json<Value> {
    Json(document())
}

fn document() -> Value {
    json!({
        "openapi": "3.0.1",
        "info": {
            "title": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
        "security": [{ SECURITY_SCHEME_NAME: [] }],
        "components": {
            "securitySchemes": {
                SECURITY_SCHEME_NAME: {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT",
                }
            }
        },
        "paths": {
            "/api/v1/me": {
                "get": {
                    "summary": "Current principal",
                    "responses": {
                        "200": { "description": "Subject and authorities of the caller" },
                        "401": { "description": "Missing or malformed bearer token" },
                        "403": { "description": "Token failed verification" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_bearer_jwt_scheme() {
        let doc = document();
        let scheme = &doc["components"]["securitySchemes"]["Bearer"];

        assert_eq!(scheme["type"], "http");
        assert_eq!(scheme["scheme"], "bearer");
        assert_eq!(scheme["bearerFormat"], "JWT");
        assert!(doc["security"][0].get("Bearer").is_some());
    }
}
