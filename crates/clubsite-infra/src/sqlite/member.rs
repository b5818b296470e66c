//! SQLite member repository implementation.
//!
//! Reads join `roles` so every member comes back with its role.

use clubsite_core::repository::member::MemberRepository;
use clubsite_types::content::{ImagePosition, Member, MemberWithRole, Role};
use clubsite_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid, query_err, write_err};

const SELECT_JOINED: &str = "SELECT m.id, m.name, m.role_id, m.image, m.image_position, m.bio, \
     m.instagram, m.linkedin, m.twitter, m.created_at, m.updated_at, \
     r.name AS role_name, r.weight AS role_weight \
     FROM members m JOIN roles r ON r.id = m.role_id";

pub struct SqliteMemberRepository {
    pool: DatabasePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct MemberRow {
    id: String,
    name: String,
    role_id: String,
    image: Option<String>,
    image_position: String,
    bio: Option<String>,
    instagram: Option<String>,
    linkedin: Option<String>,
    twitter: Option<String>,
    created_at: String,
    updated_at: String,
    role_name: String,
    role_weight: i64,
}

impl MemberRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            role_id: row.try_get("role_id")?,
            image: row.try_get("image")?,
            image_position: row.try_get("image_position")?,
            bio: row.try_get("bio")?,
            instagram: row.try_get("instagram")?,
            linkedin: row.try_get("linkedin")?,
            twitter: row.try_get("twitter")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            role_name: row.try_get("role_name")?,
            role_weight: row.try_get("role_weight")?,
        })
    }

    fn into_member_with_role(self) -> Result<MemberWithRole, RepositoryError> {
        let role_id = parse_uuid(&self.role_id, "role")?;
        // Unknown positions fall back to the default focal point.
        let image_position = self
            .image_position
            .parse::<ImagePosition>()
            .unwrap_or_default();

        Ok(MemberWithRole {
            member: Member {
                id: parse_uuid(&self.id, "member")?,
                name: self.name,
                role_id,
                image: self.image,
                image_position,
                bio: self.bio,
                instagram: self.instagram,
                linkedin: self.linkedin,
                twitter: self.twitter,
                created_at: parse_datetime(&self.created_at)?,
                updated_at: parse_datetime(&self.updated_at)?,
            },
            role: Role {
                id: role_id,
                name: self.role_name,
                weight: self.role_weight,
            },
        })
    }
}

fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<MemberWithRole, RepositoryError> {
    MemberRow::from_row(row)
        .map_err(query_err)?
        .into_member_with_role()
}

impl MemberRepository for SqliteMemberRepository {
    async fn create(&self, member: &Member) -> Result<Member, RepositoryError> {
        sqlx::query(
            "INSERT INTO members (id, name, role_id, image, image_position, bio, instagram, linkedin, twitter, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(member.id.to_string())
        .bind(&member.name)
        .bind(member.role_id.to_string())
        .bind(&member.image)
        .bind(member.image_position.to_string())
        .bind(&member.bio)
        .bind(&member.instagram)
        .bind(&member.linkedin)
        .bind(&member.twitter)
        .bind(format_datetime(&member.created_at))
        .bind(format_datetime(&member.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| write_err(e, "member role does not exist"))?;

        Ok(member.clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<MemberWithRole>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_JOINED} WHERE m.id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;
        row.as_ref().map(decode).transpose()
    }

    async fn list_with_roles(&self) -> Result<Vec<MemberWithRole>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{SELECT_JOINED} ORDER BY r.weight ASC, r.name ASC, m.name ASC"
        ))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;
        rows.iter().map(decode).collect()
    }

    async fn update(&self, member: &Member) -> Result<Member, RepositoryError> {
        let result = sqlx::query(
            "UPDATE members SET name = ?, role_id = ?, image = ?, image_position = ?, bio = ?, instagram = ?, linkedin = ?, twitter = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&member.name)
        .bind(member.role_id.to_string())
        .bind(&member.image)
        .bind(member.image_position.to_string())
        .bind(&member.bio)
        .bind(&member.instagram)
        .bind(&member.linkedin)
        .bind(&member.twitter)
        .bind(format_datetime(&member.updated_at))
        .bind(member.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| write_err(e, "member role does not exist"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(member.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
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
