//! SQLite admin account repository implementation.

use clubsite_core::repository::admin::AdminRepository;
use clubsite_types::admin::Admin;
use clubsite_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid, query_err, write_err};

pub struct SqliteAdminRepository {
    pool: DatabasePool,
}

impl SqliteAdminRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl AdminRepository for SqliteAdminRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let id: String = row.try_get("id").map_err(query_err)?;
        let created_at: String = row.try_get("created_at").map_err(query_err)?;
        Ok(Some(Admin {
            id: parse_uuid(&id, "admin")?,
            username: row.try_get("username").map_err(query_err)?,
            password_hash: row.try_get("password_hash").map_err(query_err)?,
            created_at: parse_datetime(&created_at)?,
        }))
    }

    async fn create(&self, admin: &Admin) -> Result<Admin, RepositoryError> {
        sqlx::query(
            "INSERT INTO admins (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(admin.id.to_string())
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(format_datetime(&admin.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| write_err(e, &format!("admin '{}' already exists", admin.username)))?;
        Ok(admin.clone())
    }

    async fn set_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE admins SET password_hash = ? WHERE username = ?")
            .bind(password_hash)
            .bind(username)
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
