//! Admin account repository trait definition.

use clubsite_types::admin::Admin;
use clubsite_types::error::RepositoryError;

pub trait AdminRepository: Send + Sync {
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<Admin>, RepositoryError>> + Send;

    /// Insert a new account. Fails with `Conflict` if the username is taken.
    fn create(
        &self,
        admin: &Admin,
    ) -> impl std::future::Future<Output = Result<Admin, RepositoryError>> + Send;

    /// Replace the password hash. Returns `NotFound` for unknown usernames.
    fn set_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
