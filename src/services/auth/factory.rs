/// Factory: build the process-wide credential verifier from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{CredentialVerifier, TokenVerifier};

pub fn build_verifier(config: &Config) -> Arc<dyn CredentialVerifier> {
    let verifier = TokenVerifier::new(
        config.secret_key.as_bytes(),
        config.auth_issuer.as_deref(),
        config.auth_audience.as_deref(),
        config.access_token_leeway_seconds,
    );

    tracing::debug!(?verifier, "credential verifier ready");

    Arc::new(verifier)
}
