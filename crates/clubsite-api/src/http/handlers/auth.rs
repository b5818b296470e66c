//! Admin login and logout.

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use clubsite_types::admin::LoginRequest;

use crate::http::error::AppError;
use crate::http::extractors::auth::{expired_session_cookie, session_cookie};
use crate::state::AppState;

/// POST /api/auth/login - Check credentials and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let session = state.auth.login(body).await?;
    let cookie = session_cookie(
        &session.token,
        state.auth.session_ttl().num_seconds(),
        state.config.server.secure_cookies,
    );
    Ok(([(SET_COOKIE, cookie)], Json(json!({ "success": true }))).into_response())
}

/// POST /api/auth/logout - Clear the session cookie.
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = expired_session_cookie(state.config.server.secure_cookies);
    ([(SET_COOKIE, cookie)], Json(json!({ "success": true }))).into_response()
}
