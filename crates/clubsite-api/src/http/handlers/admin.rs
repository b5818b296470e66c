//! Admin JSON API: content CRUD behind an admin session.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clubsite_core::repository::event::EventFilter;
use clubsite_core::repository::{ListOptions, SortOrder};
use clubsite_types::content::{
    CreateEventRequest, CreateMemberRequest, CreateNewsRequest, CreateProjectRequest,
    CreateRoleRequest, Event, Member, MemberWithRole, News, Project, Role, UpdateEventRequest,
    UpdateMemberRequest, UpdateNewsRequest, UpdateProjectRequest,
};
use clubsite_types::error::ContentError;

use crate::http::error::AppError;
use crate::http::extractors::auth::AdminSession;
use crate::http::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Query string for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// "asc" or "desc" (default).
    pub order: Option<String>,
    pub limit: Option<i64>,
    /// Events only: "upcoming" or "past".
    pub window: Option<String>,
}

impl ListQuery {
    fn sort_order(&self) -> SortOrder {
        match self.order.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    fn list_options(&self) -> ListOptions {
        ListOptions {
            sort_order: self.sort_order(),
            limit: self.limit,
        }
    }

    fn event_filter(&self) -> Result<EventFilter, AppError> {
        let now = Utc::now();
        match self.window.as_deref() {
            None => Ok(EventFilter {
                window: None,
                sort_order: self.sort_order(),
                limit: self.limit,
            }),
            Some("upcoming") => Ok(EventFilter::upcoming(now, self.limit)),
            Some("past") => Ok(EventFilter::past(now, self.limit)),
            Some(other) => Err(AppError::Validation(format!(
                "invalid window '{other}', expected 'upcoming' or 'past'"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
}

/// Entity counts shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub roles: usize,
    pub members: usize,
    pub events: usize,
    pub projects: usize,
    pub news: usize,
}

impl Stats {
    pub async fn collect(state: &AppState) -> Result<Self, ContentError> {
        let content = &state.content;
        Ok(Self {
            roles: content.list_roles(SortOrder::Asc).await?.len(),
            members: content.list_members().await?.len(),
            events: content.list_events(EventFilter::default()).await?.len(),
            projects: content.list_projects(ListOptions::default()).await?.len(),
            news: content.list_news(ListOptions::default()).await?.len(),
        })
    }
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<AppState>, _session: AdminSession) -> ApiResult<Stats> {
    let start = Instant::now();
    Ok(Json(ApiResponse::timed(Stats::collect(&state).await?, start)))
}

// --- Roles ---

/// GET /api/admin/roles - Roles in ascending weight.
pub async fn list_roles(State(state): State<AppState>, _session: AdminSession) -> ApiResult<Vec<Role>> {
    let start = Instant::now();
    let roles = state.content.list_roles(SortOrder::Asc).await?;
    Ok(Json(ApiResponse::timed(roles, start)))
}

pub async fn create_role(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(body): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Role>>), AppError> {
    let start = Instant::now();
    let role = state.content.create_role(body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::timed(role, start))))
}

/// DELETE /api/admin/roles/{id} - Fails with 409 while members hold the role.
pub async fn delete_role(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let start = Instant::now();
    state.content.delete_role(&id).await?;
    Ok(Json(ApiResponse::timed(Deleted { id }, start)))
}

// --- Members ---

pub async fn list_members(
    State(state): State<AppState>,
    _session: AdminSession,
) -> ApiResult<Vec<MemberWithRole>> {
    let start = Instant::now();
    let members = state.content.list_members().await?;
    Ok(Json(ApiResponse::timed(members, start)))
}

pub async fn get_member(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<MemberWithRole> {
    let start = Instant::now();
    let member = state.content.get_member(&id).await?;
    Ok(Json(ApiResponse::timed(member, start)))
}

pub async fn create_member(
    State(state): State<AppState>,
    session: AdminSession,
    Json(body): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Member>>), AppError> {
    let start = Instant::now();
    let member = state.content.create_member(body).await?;
    tracing::info!(admin = %session.0.username, member_id = %member.id, "member added");
    Ok((StatusCode::CREATED, Json(ApiResponse::timed(member, start))))
}

pub async fn update_member(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMemberRequest>,
) -> ApiResult<Member> {
    let start = Instant::now();
    let member = state.content.update_member(&id, body).await?;
    Ok(Json(ApiResponse::timed(member, start)))
}

pub async fn delete_member(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let start = Instant::now();
    state.content.delete_member(&id).await?;
    Ok(Json(ApiResponse::timed(Deleted { id }, start)))
}

// --- Events ---

/// GET /api/admin/events?window=upcoming|past&order=asc|desc&limit=N
pub async fn list_events(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Event>> {
    let start = Instant::now();
    let events = state.content.list_events(query.event_filter()?).await?;
    Ok(Json(ApiResponse::timed(events, start)))
}

pub async fn get_event(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Event> {
    let start = Instant::now();
    let event = state.content.get_event(&id).await?;
    Ok(Json(ApiResponse::timed(event, start)))
}

pub async fn create_event(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), AppError> {
    let start = Instant::now();
    let event = state.content.create_event(body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::timed(event, start))))
}

pub async fn update_event(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEventRequest>,
) -> ApiResult<Event> {
    let start = Instant::now();
    let event = state.content.update_event(&id, body).await?;
    Ok(Json(ApiResponse::timed(event, start)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let start = Instant::now();
    state.content.delete_event(&id).await?;
    Ok(Json(ApiResponse::timed(Deleted { id }, start)))
}

// --- Projects ---

pub async fn list_projects(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Project>> {
    let start = Instant::now();
    let projects = state.content.list_projects(query.list_options()).await?;
    Ok(Json(ApiResponse::timed(projects, start)))
}

pub async fn get_project(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Project> {
    let start = Instant::now();
    let project = state.content.get_project(&id).await?;
    Ok(Json(ApiResponse::timed(project, start)))
}

pub async fn create_project(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), AppError> {
    let start = Instant::now();
    let project = state.content.create_project(body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::timed(project, start))))
}

pub async fn update_project(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProjectRequest>,
) -> ApiResult<Project> {
    let start = Instant::now();
    let project = state.content.update_project(&id, body).await?;
    Ok(Json(ApiResponse::timed(project, start)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let start = Instant::now();
    state.content.delete_project(&id).await?;
    Ok(Json(ApiResponse::timed(Deleted { id }, start)))
}

// --- News ---

pub async fn list_news(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<News>> {
    let start = Instant::now();
    let news = state.content.list_news(query.list_options()).await?;
    Ok(Json(ApiResponse::timed(news, start)))
}

pub async fn get_news(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<News> {
    let start = Instant::now();
    let news = state.content.get_news(&id).await?;
    Ok(Json(ApiResponse::timed(news, start)))
}

pub async fn create_news(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(body): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<News>>), AppError> {
    let start = Instant::now();
    let news = state.content.create_news(body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::timed(news, start))))
}

pub async fn update_news(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNewsRequest>,
) -> ApiResult<News> {
    let start = Instant::now();
    let news = state.content.update_news(&id, body).await?;
    Ok(Json(ApiResponse::timed(news, start)))
}

pub async fn delete_news(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let start = Instant::now();
    state.content.delete_news(&id).await?;
    Ok(Json(ApiResponse::timed(Deleted { id }, start)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults_to_newest_first() {
        let query = ListQuery::default();
        let options = query.list_options();
        assert_eq!(options.sort_order, SortOrder::Desc);
        assert!(options.limit.is_none());
    }

    #[test]
    fn event_window_parsing() {
        let query = ListQuery {
            window: Some("upcoming".to_string()),
            limit: Some(3),
            ..ListQuery::default()
        };
        let filter = query.event_filter().unwrap();
        assert_eq!(filter.sort_order, SortOrder::Asc);
        assert_eq!(filter.limit, Some(3));

        let query = ListQuery {
            window: Some("someday".to_string()),
            ..ListQuery::default()
        };
        assert!(matches!(query.event_filter(), Err(AppError::Validation(_))));
    }
}
