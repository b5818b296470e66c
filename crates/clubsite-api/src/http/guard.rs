//! Route guard for the admin pages.
//!
//! - `/admin` and everything below it redirects to the login page unless
//!   the request carries a valid session.
//! - The login page redirects to the dashboard when a session is present.
//!
//! The admin JSON API is protected separately by the
//! [`AdminSession`](crate::http::extractors::auth::AdminSession) extractor.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::http::extractors::auth::session_claims;
use crate::state::AppState;

pub const DASHBOARD_PATH: &str = "/admin/dashboard";

fn is_admin_page(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}

pub async fn admin_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let login_path = state.config.server.login_path.as_str();

    if is_admin_page(path) {
        if session_claims(request.headers(), &state).is_none() {
            return Redirect::to(login_path).into_response();
        }
    } else if path == login_path && session_claims(request.headers(), &state).is_some() {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    next.run(request).await
}
