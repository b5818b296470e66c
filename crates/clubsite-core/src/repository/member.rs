//! Member repository trait definition.

use clubsite_types::content::{Member, MemberWithRole};
use clubsite_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for club members.
///
/// Reads always join the member's role so callers can group and order by
/// role weight without a second query.
pub trait MemberRepository: Send + Sync {
    fn create(
        &self,
        member: &Member,
    ) -> impl std::future::Future<Output = Result<Member, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<MemberWithRole>, RepositoryError>> + Send;

    /// Every member, ordered by role weight ascending, then name.
    fn list_with_roles(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MemberWithRole>, RepositoryError>> + Send;

    /// Replace the stored row. Returns `NotFound` if the id is unknown.
    fn update(
        &self,
        member: &Member,
    ) -> impl std::future::Future<Output = Result<Member, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
