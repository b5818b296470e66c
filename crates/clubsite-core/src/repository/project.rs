//! Project repository trait definition.

use clubsite_types::content::Project;
use clubsite_types::error::RepositoryError;
use uuid::Uuid;

use super::ListOptions;

pub trait ProjectRepository: Send + Sync {
    fn create(
        &self,
        project: &Project,
    ) -> impl std::future::Future<Output = Result<Project, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Project>, RepositoryError>> + Send;

    /// Projects ordered by `created_at`.
    fn list(
        &self,
        options: ListOptions,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, RepositoryError>> + Send;

    fn update(
        &self,
        project: &Project,
    ) -> impl std::future::Future<Output = Result<Project, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
