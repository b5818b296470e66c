//! Admin authentication service.
//!
//! A successful login yields a signed session token carrying
//! `{id, username, iat, exp}`. Every admin request re-verifies the token's
//! signature and expiry; nothing is stored server-side.

use chrono::{Duration, Utc};
use clubsite_types::admin::{Admin, LoginRequest, SessionClaims};
use clubsite_types::content::new_id;
use clubsite_types::error::{AuthError, RepositoryError};
use clubsite_types::non_blank;

use crate::repository::admin::AdminRepository;
use crate::service::credentials::{PasswordHasher, SessionSigner};

/// Result of [`AuthService::ensure_admin`].
#[derive(Debug, Clone)]
pub enum SeedOutcome {
    Created(Admin),
    AlreadyExists(Admin),
}

/// An issued session: the token to hand to the client plus its claims.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: SessionClaims,
}

pub struct AuthService<A: AdminRepository, H: PasswordHasher, S: SessionSigner> {
    admins: A,
    hasher: H,
    signer: S,
    ttl: Duration,
}

impl<A: AdminRepository, H: PasswordHasher, S: SessionSigner> AuthService<A, H, S> {
    pub fn new(admins: A, hasher: H, signer: S, ttl: Duration) -> Self {
        Self {
            admins,
            hasher,
            signer,
            ttl,
        }
    }

    /// Lifetime of issued sessions (also the cookie max-age).
    pub fn session_ttl(&self) -> Duration {
        self.ttl
    }

    /// Check credentials and issue a session.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn login(&self, request: LoginRequest) -> Result<Session, AuthError> {
        let (Some(username), Some(password)) = (non_blank(request.username), request.password)
        else {
            return Err(AuthError::MissingFields);
        };
        if password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let admin = self
            .admins
            .get_by_username(&username)
            .await
            .map_err(storage)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(&password, &admin.password_hash)? {
            tracing::warn!(username = %username, "rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let claims = SessionClaims {
            id: admin.id,
            username: admin.username,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = self.signer.sign(&claims)?;
        tracing::info!(username = %claims.username, "admin logged in");
        Ok(Session { token, claims })
    }

    /// Verify a session token's signature and expiry.
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let claims = self.signer.verify(token)?;
        if claims.is_expired(Utc::now()) {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }

    /// Create the account unless the username already exists.
    ///
    /// An existing account is left untouched, so seeding is idempotent.
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SeedOutcome, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if let Some(existing) = self
            .admins
            .get_by_username(username)
            .await
            .map_err(storage)?
        {
            return Ok(SeedOutcome::AlreadyExists(existing));
        }

        let admin = Admin {
            id: new_id(),
            username: username.to_string(),
            password_hash: self.hasher.hash(password)?,
            created_at: Utc::now(),
        };
        let created = self.admins.create(&admin).await.map_err(storage)?;
        tracing::info!(username = %created.username, "admin account created");
        Ok(SeedOutcome::Created(created))
    }

    /// Set a new password for an existing account.
    pub async fn reset_password(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let hash = self.hasher.hash(password)?;
        match self.admins.set_password_hash(username, &hash).await {
            Ok(()) => {
                tracing::info!(username = %username, "admin password reset");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(AuthError::UnknownAdmin(username.to_string())),
            Err(e) => Err(storage(e)),
        }
    }
}

fn storage(e: RepositoryError) -> AuthError {
    AuthError::StorageError(e.to_string())
}
