//! SQLite project repository implementation.

use clubsite_core::repository::ListOptions;
use clubsite_core::repository::project::ProjectRepository;
use clubsite_types::content::Project;
use clubsite_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid, query_err};

pub struct SqliteProjectRepository {
    pool: DatabasePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ProjectRow {
    id: String,
    title: String,
    description: String,
    content: String,
    thumbnail: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProjectRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            content: row.try_get("content")?,
            thumbnail: row.try_get("thumbnail")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_project(self) -> Result<Project, RepositoryError> {
        Ok(Project {
            id: parse_uuid(&self.id, "project")?,
            title: self.title,
            description: self.description,
            content: self.content,
            thumbnail: self.thumbnail,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<Project, RepositoryError> {
    ProjectRow::from_row(row).map_err(query_err)?.into_project()
}

impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: &Project) -> Result<Project, RepositoryError> {
        sqlx::query(
            "INSERT INTO projects (id, title, description, content, thumbnail, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(project.id.to_string())
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.content)
        .bind(&project.thumbnail)
        .bind(format_datetime(&project.created_at))
        .bind(format_datetime(&project.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;
        Ok(project.clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;
        row.as_ref().map(decode).transpose()
    }

    async fn list(&self, options: ListOptions) -> Result<Vec<Project>, RepositoryError> {
        let sql = format!(
            "SELECT * FROM projects ORDER BY created_at {} LIMIT ?",
            options.sort_order.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(options.limit.unwrap_or(-1))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;
        rows.iter().map(decode).collect()
    }

    async fn update(&self, project: &Project) -> Result<Project, RepositoryError> {
        let result = sqlx::query(
            "UPDATE projects SET title = ?, description = ?, content = ?, thumbnail = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.content)
        .bind(&project.thumbnail)
        .bind(format_datetime(&project.updated_at))
        .bind(project.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(project.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
