//! Role repository trait definition.

use clubsite_types::content::Role;
use clubsite_types::error::RepositoryError;
use uuid::Uuid;

use super::SortOrder;

/// Repository trait for member roles.
///
/// Implementations live in clubsite-infra (e.g., SqliteRoleRepository).
pub trait RoleRepository: Send + Sync {
    fn create(
        &self,
        role: &Role,
    ) -> impl std::future::Future<Output = Result<Role, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Role>, RepositoryError>> + Send;

    /// All roles ordered by weight, ties broken by name.
    fn list(
        &self,
        order: SortOrder,
    ) -> impl std::future::Future<Output = Result<Vec<Role>, RepositoryError>> + Send;

    /// Delete a role. Fails with `Conflict` while members still reference it.
    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
