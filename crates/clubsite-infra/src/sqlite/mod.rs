//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools. Ids are stored as hyphenated UUID text and
//! timestamps as fixed-width RFC 3339 UTC strings.

pub mod admin;
pub mod event;
pub mod member;
pub mod news;
pub mod pool;
pub mod project;
pub mod role;

use chrono::{DateTime, SecondsFormat, Utc};
use clubsite_types::error::RepositoryError;
use uuid::Uuid;

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Microsecond precision with a `Z` suffix, so string order is time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_uuid(s: &str, what: &str) -> Result<Uuid, RepositoryError> {
    s.parse::<Uuid>()
        .map_err(|e| RepositoryError::Query(format!("invalid {what} id: {e}")))
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// Map constraint violations to `Conflict`, everything else to `Query`.
fn write_err(e: sqlx::Error, conflict: &str) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db_err)
            if db_err.message().contains("UNIQUE")
                || db_err.message().contains("FOREIGN KEY") =>
        {
            RepositoryError::Conflict(conflict.to_string())
        }
        _ => query_err(e),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::pool::DatabasePool;

    pub async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }
}
