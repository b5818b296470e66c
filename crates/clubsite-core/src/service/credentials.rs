//! Credential primitives used by the auth service.
//!
//! Defined in clubsite-core so login and session checks stay independent of
//! a specific hashing or signing algorithm. The Argon2 and HMAC-SHA256
//! adapters live in clubsite-infra.

use clubsite_types::admin::SessionClaims;
use clubsite_types::error::AuthError;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash string (salt and parameters included).
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Signs and verifies session tokens.
///
/// `verify` only checks integrity; expiry is the caller's concern.
pub trait SessionSigner: Send + Sync {
    fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError>;

    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}
