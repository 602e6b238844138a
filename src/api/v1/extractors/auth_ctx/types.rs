/*
 * Responsibility
 * - The authenticated-principal type handlers see
 * - The access middleware verifies the token and stores this in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Token verification lives in services::auth, this is only the contract
 * - It lives and dies with one request (no global "current user")
 */

use thiserror::Error;

use crate::services::auth::ClaimSet;

pub const ROLE_PREFIX: &str = "ROLE_";

/// Claims were verified but cannot form a principal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalError {
    #[error("missing or empty '{0}' claim")]
    MissingClaim(&'static str),
}

/// Context attached to an authenticated request.
///
/// - `subject` is the token's `sub` (an email address by convention)
/// - `authorities` holds `ROLE_<ROLE>`; tokens carry a single role, so there is one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub subject: String,
    pub authorities: Vec<String>,
}

impl AuthCtx {
    pub fn from_claims(claims: &ClaimSet) -> Result<Self, PrincipalError> {
        let subject = claims
            .subject()
            .filter(|s| !s.trim().is_empty())
            .ok_or(PrincipalError::MissingClaim("sub"))?;

        let role = claims
            .role()
            .filter(|s| !s.trim().is_empty())
            .ok_or(PrincipalError::MissingClaim("role"))?;

        Ok(Self {
            subject: subject.to_string(),
            authorities: vec![authority_for(role)],
        })
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// `has_role("admin")` checks for `ROLE_ADMIN`.
    pub fn has_role(&self, role: &str) -> bool {
        self.has_authority(&authority_for(role))
    }
}

fn authority_for(role: &str) -> String {
    format!("{ROLE_PREFIX}{}", role.to_uppercase())
}
