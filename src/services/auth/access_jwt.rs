use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors returned by access-token verification.
///
/// The gate treats every variant the same way (403); the split exists for logs.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("empty token")]
    Empty,
    #[error("token expired")]
    Expired,
    #[error("jwt verification failed: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

impl VerificationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Expired => "expired",
            Self::Invalid(_) => "invalid",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(e),
        }
    }
}

/// Claims decoded from a token whose signature and time claims checked out.
///
/// Only a verifier can build one, so holding a `ClaimSet` means the payload was signed
/// with our key. The map is exactly the signed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// `sub`: principal identifier (an email address by convention).
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    /// `role`: a single role name, e.g. `admin`.
    pub fn role(&self) -> Option<&str> {
        self.0.get("role").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Seam between the gate and token verification.
pub trait CredentialVerifier: Send + Sync {
    /// `token` is the raw token, without the `Bearer ` prefix.
    fn verify(&self, token: &str) -> Result<ClaimSet, VerificationError>;
}

/// HMAC (HS256/384/512) access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// `issuer` / `audience` are only enforced when given; `exp` and `nbf` are checked
    /// whenever the token carries them.
    pub fn new(
        secret: &[u8],
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;

        let mut required: Vec<&str> = Vec::new();
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
            required.push("iss");
        }
        match audience {
            Some(aud) => {
                validation.set_audience(&[aud]);
                required.push("aud");
            }
            None => validation.validate_aud = false,
        }
        // `exp` is optional; when present it is still validated.
        validation.set_required_spec_claims(&required);

        Self {
            decoding_key,
            validation,
        }
    }
}

impl CredentialVerifier for TokenVerifier {
    fn verify(&self, token: &str) -> Result<ClaimSet, VerificationError> {
        if token.is_empty() {
            return Err(VerificationError::Empty);
        }

        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        Ok(ClaimSet(data.claims))
    }
}
