//! Server-rendered public and admin pages.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use minijinja::context;
use uuid::Uuid;

use clubsite_core::repository::ListOptions;
use clubsite_core::service::body::parse_body;

use crate::http::error::PageError;
use crate::http::extractors::auth::session_claims;
use crate::http::guard::DASHBOARD_PATH;
use crate::http::handlers::admin::Stats;
use crate::state::AppState;

const HOME_NEWS: i64 = 5;
const HOME_PROJECTS: i64 = 10;
const HOME_PAST_EVENTS: i64 = 5;

type PageResult = Result<Html<String>, PageError>;

/// GET / - Upcoming events, latest news and projects, recent past events.
pub async fn home(State(state): State<AppState>) -> PageResult {
    let now = Utc::now();
    let content = &state.content;
    let upcoming_events = content.upcoming_events(now, None).await?;
    let past_events = content.past_events(now, Some(HOME_PAST_EVENTS)).await?;
    let news = content.list_news(ListOptions::latest(HOME_NEWS)).await?;
    let projects = content.list_projects(ListOptions::latest(HOME_PROJECTS)).await?;

    let html = state.views.render(
        "home.html",
        context! { upcoming_events, past_events, news, projects },
    )?;
    Ok(Html(html))
}

/// GET /members - Members grouped by role.
pub async fn members(State(state): State<AppState>) -> PageResult {
    let groups = state.content.members_by_role().await?;
    Ok(Html(state.views.render("members.html", context! { groups })?))
}

/// GET /events
pub async fn events(State(state): State<AppState>) -> PageResult {
    let now = Utc::now();
    let upcoming_events = state.content.upcoming_events(now, None).await?;
    let past_events = state.content.past_events(now, None).await?;
    Ok(Html(state.views.render(
        "events.html",
        context! { upcoming_events, past_events },
    )?))
}

/// GET /projects/{id}
pub async fn project(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id)?;
    let project = state.content.get_project(&id).await?;
    let html = state.views.render(
        "article.html",
        context! {
            title => project.title,
            description => project.description,
            thumbnail => project.thumbnail,
            date => None::<String>,
            blocks => parse_body(&project.content),
        },
    )?;
    Ok(Html(html))
}

/// GET /news/{id}
pub async fn news(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id)?;
    let news = state.content.get_news(&id).await?;
    let html = state.views.render(
        "article.html",
        context! {
            title => news.title,
            description => news.description,
            thumbnail => news.thumbnail,
            date => news.date,
            blocks => parse_body(&news.content),
        },
    )?;
    Ok(Html(html))
}

/// GET {login_path} - The admin login form.
pub async fn login(State(state): State<AppState>) -> PageResult {
    Ok(Html(state.views.render("login.html", context! {})?))
}

/// GET /admin
pub async fn admin_index() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

/// GET /admin/dashboard - Content counts for the signed-in admin.
pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, PageError> {
    // The guard already checked the session; re-read it for the username.
    let Some(claims) = session_claims(&headers, &state) else {
        return Ok(Redirect::to(&state.config.server.login_path).into_response());
    };
    let counts = Stats::collect(&state).await?;
    let html = state.views.render(
        "dashboard.html",
        context! { username => claims.username, counts },
    )?;
    Ok(Html(html).into_response())
}

/// Fallback for unknown paths.
pub async fn not_found() -> PageError {
    PageError::NotFound
}

/// Malformed ids are indistinguishable from unknown ones.
fn parse_id(raw: &str) -> Result<Uuid, PageError> {
    Uuid::parse_str(raw).map_err(|_| PageError::NotFound)
}
