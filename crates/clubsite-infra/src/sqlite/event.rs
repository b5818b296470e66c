//! SQLite event repository implementation.

use clubsite_core::repository::event::{EventFilter, EventRepository, EventWindow};
use clubsite_types::content::Event;
use clubsite_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid, query_err};

pub struct SqliteEventRepository {
    pool: DatabasePool,
}

impl SqliteEventRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn event_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Event, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let date: String = row.try_get("date").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_err)?;
    Ok(Event {
        id: parse_uuid(&id, "event")?,
        title: row.try_get("title").map_err(query_err)?,
        description: row.try_get("description").map_err(query_err)?,
        image: row.try_get("image").map_err(query_err)?,
        date: parse_datetime(&date)?,
        link: row.try_get("link").map_err(query_err)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: &Event) -> Result<Event, RepositoryError> {
        sqlx::query(
            "INSERT INTO events (id, title, description, image, date, link, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event.id.to_string())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.image)
        .bind(format_datetime(&event.date))
        .bind(&event.link)
        .bind(format_datetime(&event.created_at))
        .bind(format_datetime(&event.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;
        Ok(event.clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM events WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;
        row.as_ref().map(event_from_row).transpose()
    }

    async fn list(&self, filter: EventFilter) -> Result<Vec<Event>, RepositoryError> {
        let (condition, bound_at) = match filter.window {
            Some(EventWindow::Upcoming { at }) => (" WHERE date >= ?", Some(at)),
            Some(EventWindow::Past { at }) => (" WHERE date < ?", Some(at)),
            None => ("", None),
        };
        let sql = format!(
            "SELECT * FROM events{condition} ORDER BY date {} LIMIT ?",
            filter.sort_order.as_sql()
        );

        let mut query = sqlx::query(&sql);
        if let Some(at) = bound_at {
            query = query.bind(format_datetime(&at));
        }
        // SQLite treats a negative LIMIT as "no limit".
        let rows = query
            .bind(filter.limit.unwrap_or(-1))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;
        rows.iter().map(event_from_row).collect()
    }

    async fn update(&self, event: &Event) -> Result<Event, RepositoryError> {
        let result = sqlx::query(
            "UPDATE events SET title = ?, description = ?, image = ?, date = ?, link = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.image)
        .bind(format_datetime(&event.date))
        .bind(&event.link)
        .bind(format_datetime(&event.updated_at))
        .bind(event.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(event.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::testing::test_pool;
    use chrono::{DateTime, Duration, Utc};
    use clubsite_core::repository::SortOrder;
    use clubsite_types::content::new_id;

    fn make_event(title: &str, date: DateTime<Utc>) -> Event {
        Event {
            id: new_id(),
            title: title.to_string(),
            description: format!("{title} detayları"),
            image: None,
            date,
            link: None,
            created_at: date,
            updated_at: date,
        }
    }

    #[tokio::test]
    async fn test_upcoming_window_is_inclusive_and_ascending() {
        let repo = SqliteEventRepository::new(test_pool().await);
        let now = Utc::now();
        repo.create(&make_event("Dün", now - Duration::days(1))).await.unwrap();
        repo.create(&make_event("Şimdi", now)).await.unwrap();
        repo.create(&make_event("Haftaya", now + Duration::days(7))).await.unwrap();
        repo.create(&make_event("Yarın", now + Duration::days(1))).await.unwrap();

        let upcoming = repo.list(EventFilter::upcoming(now, None)).await.unwrap();
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Şimdi", "Yarın", "Haftaya"]);

        let limited = repo.list(EventFilter::upcoming(now, Some(2))).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_past_window_descending() {
        let repo = SqliteEventRepository::new(test_pool().await);
        let now = Utc::now();
        for days in 1..=7 {
            repo.create(&make_event(&format!("E{days}"), now - Duration::days(days)))
                .await
                .unwrap();
        }
        let past = repo.list(EventFilter::past(now, Some(5))).await.unwrap();
        assert_eq!(past.len(), 5);
        assert_eq!(past[0].title, "E1");
        assert_eq!(past[4].title, "E5");
    }

    #[tokio::test]
    async fn test_list_all_and_update() {
        let repo = SqliteEventRepository::new(test_pool().await);
        let now = Utc::now();
        let mut event = make_event("Atölye", now);
        repo.create(&event).await.unwrap();

        event.link = Some("https://forms.example/atolye".to_string());
        repo.update(&event).await.unwrap();

        let all = repo
            .list(EventFilter {
                window: None,
                sort_order: SortOrder::Asc,
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].link.as_deref(), Some("https://forms.example/atolye"));

        repo.delete(&event.id).await.unwrap();
        assert!(matches!(
            repo.delete(&event.id).await.unwrap_err(),
            RepositoryError::NotFound
        ));
    }
}
