pub mod access_jwt;
pub mod factory;
#[cfg(test)]
pub(crate) mod test_support;

pub use access_jwt::{ClaimSet, CredentialVerifier, TokenVerifier, VerificationError};
pub use factory::build_verifier;
