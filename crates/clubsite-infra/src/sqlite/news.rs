//! SQLite news repository implementation.

use clubsite_core::repository::ListOptions;
use clubsite_core::repository::news::NewsRepository;
use clubsite_types::content::News;
use clubsite_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid, query_err};

pub struct SqliteNewsRepository {
    pool: DatabasePool,
}

impl SqliteNewsRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn news_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<News, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let date: String = row.try_get("date").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_err)?;
    Ok(News {
        id: parse_uuid(&id, "news")?,
        title: row.try_get("title").map_err(query_err)?,
        description: row.try_get("description").map_err(query_err)?,
        content: row.try_get("content").map_err(query_err)?,
        thumbnail: row.try_get("thumbnail").map_err(query_err)?,
        date: parse_datetime(&date)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl NewsRepository for SqliteNewsRepository {
    async fn create(&self, news: &News) -> Result<News, RepositoryError> {
        sqlx::query(
            "INSERT INTO news (id, title, description, content, thumbnail, date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(news.id.to_string())
        .bind(&news.title)
        .bind(&news.description)
        .bind(&news.content)
        .bind(&news.thumbnail)
        .bind(format_datetime(&news.date))
        .bind(format_datetime(&news.created_at))
        .bind(format_datetime(&news.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;
        Ok(news.clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<News>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM news WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;
        row.as_ref().map(news_from_row).transpose()
    }

    async fn list(&self, options: ListOptions) -> Result<Vec<News>, RepositoryError> {
        let sql = format!(
            "SELECT * FROM news ORDER BY date {}, created_at {} LIMIT ?",
            options.sort_order.as_sql(),
            options.sort_order.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(options.limit.unwrap_or(-1))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;
        rows.iter().map(news_from_row).collect()
    }

    async fn update(&self, news: &News) -> Result<News, RepositoryError> {
        let result = sqlx::query(
            "UPDATE news SET title = ?, description = ?, content = ?, thumbnail = ?, date = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&news.title)
        .bind(&news.description)
        .bind(&news.content)
        .bind(&news.thumbnail)
        .bind(format_datetime(&news.date))
        .bind(format_datetime(&news.updated_at))
        .bind(news.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(news.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM news WHERE id = ?")
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
