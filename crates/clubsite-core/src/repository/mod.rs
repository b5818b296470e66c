//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (clubsite-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod admin;
pub mod event;
pub mod member;
pub mod news;
pub mod project;
pub mod role;

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Ordering and size bound for list queries over dated content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
}

impl ListOptions {
    /// Most recent first, at most `limit` rows.
    pub fn latest(limit: i64) -> Self {
        Self {
            sort_order: SortOrder::Desc,
            limit: Some(limit),
        }
    }
}
