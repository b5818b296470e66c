//! SQLite role repository implementation.

use clubsite_core::repository::SortOrder;
use clubsite_core::repository::role::RoleRepository;
use clubsite_types::content::Role;
use clubsite_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{parse_uuid, query_err, write_err};

pub struct SqliteRoleRepository {
    pool: DatabasePool,
}

impl SqliteRoleRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn role_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Role, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    Ok(Role {
        id: parse_uuid(&id, "role")?,
        name: row.try_get("name").map_err(query_err)?,
        weight: row.try_get("weight").map_err(query_err)?,
    })
}

impl RoleRepository for SqliteRoleRepository {
    async fn create(&self, role: &Role) -> Result<Role, RepositoryError> {
        sqlx::query("INSERT INTO roles (id, name, weight) VALUES (?, ?, ?)")
            .bind(role.id.to_string())
            .bind(&role.name)
            .bind(role.weight)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_err(e, &format!("role '{}' already exists", role.name)))?;
        Ok(role.clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Role>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, weight FROM roles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;
        row.as_ref().map(role_from_row).transpose()
    }

    async fn list(&self, order: SortOrder) -> Result<Vec<Role>, RepositoryError> {
        let sql = format!(
            "SELECT id, name, weight FROM roles ORDER BY weight {}, name ASC",
            order.as_sql()
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;
        rows.iter().map(role_from_row).collect()
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_err(e, "role still has members"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::testing::test_pool;
    use clubsite_types::content::new_id;

    fn role(name: &str, weight: i64) -> Role {
        Role {
            id: new_id(),
            name: name.to_string(),
            weight,
        }
    }

    #[tokio::test]
    async fn test_create_get_and_list_by_weight() {
        let repo = SqliteRoleRepository::new(test_pool().await);
        let member = repo.create(&role("Üye", 10)).await.unwrap();
        let lead = repo.create(&role("Başkan", 0)).await.unwrap();
        repo.create(&role("Yazılım", 5)).await.unwrap();

        let found = repo.get_by_id(&lead.id).await.unwrap().unwrap();
        assert_eq!(found, lead);

        let asc = repo.list(SortOrder::Asc).await.unwrap();
        let names: Vec<&str> = asc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Başkan", "Yazılım", "Üye"]);

        let desc = repo.list(SortOrder::Desc).await.unwrap();
        assert_eq!(desc[0].id, member.id);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let repo = SqliteRoleRepository::new(test_pool().await);
        repo.create(&role("Başkan", 0)).await.unwrap();
        let err = repo.create(&role("Başkan", 1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = SqliteRoleRepository::new(test_pool().await);
        let err = repo.delete(&new_id()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
