//! Token minting for tests. Issuance is not part of this service.
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

pub const KEY: &[u8] = b"test-secret-key-test-secret-key-0123";

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn sign<T: Serialize>(claims: &T) -> String {
    sign_with(Header::new(Algorithm::HS256), KEY, claims)
}

pub fn sign_with<T: Serialize>(header: Header, key: &[u8], claims: &T) -> String {
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(key)).unwrap()
}
