/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the authenticated principal (AuthCtx) to handlers
 * - axum-specific code lives in core, the type contract in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 * - PrincipalError
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use self::types::{AuthCtx, PrincipalError, ROLE_PREFIX};
