/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - the credential verifier (symmetric key + validation policy, read-only after startup)
 * - Cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::CredentialVerifier;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }
}
