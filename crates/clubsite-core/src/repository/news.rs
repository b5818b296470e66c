//! News repository trait definition.

use clubsite_types::content::News;
use clubsite_types::error::RepositoryError;
use uuid::Uuid;

use super::ListOptions;

pub trait NewsRepository: Send + Sync {
    fn create(
        &self,
        news: &News,
    ) -> impl std::future::Future<Output = Result<News, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<News>, RepositoryError>> + Send;

    /// Articles ordered by publication `date`.
    fn list(
        &self,
        options: ListOptions,
    ) -> impl std::future::Future<Output = Result<Vec<News>, RepositoryError>> + Send;

    fn update(
        &self,
        news: &News,
    ) -> impl std::future::Future<Output = Result<News, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
