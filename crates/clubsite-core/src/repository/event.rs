//! Event repository trait definition.

use chrono::{DateTime, Utc};
use clubsite_types::content::Event;
use clubsite_types::error::RepositoryError;
use uuid::Uuid;

use super::SortOrder;

/// Which side of a reference instant to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventWindow {
    /// `date >= at`
    Upcoming { at: DateTime<Utc> },
    /// `date < at`
    Past { at: DateTime<Utc> },
}

/// Filter criteria for listing events. Results are always ordered by `date`.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub window: Option<EventWindow>,
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
}

impl EventFilter {
    /// Soonest first, starting at `at`.
    pub fn upcoming(at: DateTime<Utc>, limit: Option<i64>) -> Self {
        Self {
            window: Some(EventWindow::Upcoming { at }),
            sort_order: SortOrder::Asc,
            limit,
        }
    }

    /// Most recent first, strictly before `at`.
    pub fn past(at: DateTime<Utc>, limit: Option<i64>) -> Self {
        Self {
            window: Some(EventWindow::Past { at }),
            sort_order: SortOrder::Desc,
            limit,
        }
    }
}

pub trait EventRepository: Send + Sync {
    fn create(
        &self,
        event: &Event,
    ) -> impl std::future::Future<Output = Result<Event, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Event>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: EventFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, RepositoryError>> + Send;

    fn update(
        &self,
        event: &Event,
    ) -> impl std::future::Future<Output = Result<Event, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
