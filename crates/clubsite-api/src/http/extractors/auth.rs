//! Admin session extractor.
//!
//! The session token is read from:
//! - the `admin-token` cookie (browser sessions)
//! - `Authorization: Bearer <token>` (scripts)
//!
//! Tokens are verified statelessly: signature and expiry only.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use clubsite_types::admin::SessionClaims;

use crate::http::error::AppError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "admin-token";

/// A verified admin session. Extracting this rejects unauthenticated
/// requests with 401.
pub struct AdminSession(pub SessionClaims);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_claims(&parts.headers, state)
            .map(AdminSession)
            .ok_or_else(|| {
                AppError::Unauthorized(
                    "Admin session required. Log in or send 'Authorization: Bearer <token>'."
                        .to_string(),
                )
            })
    }
}

/// Claims of the request's session, if it carries a valid one.
pub fn session_claims(headers: &HeaderMap, state: &AppState) -> Option<SessionClaims> {
    let token = session_token(headers)?;
    match state.auth.verify_session(&token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring invalid session token");
            None
        }
    }
}

/// Raw session token from the cookie, else the bearer header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying a fresh session.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn expired_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn token_from_cookie() {
        let h = headers(&[("cookie", "theme=dark; admin-token=abc.def.ghi; other=1")]);
        assert_eq!(session_token(&h).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn token_from_bearer() {
        let h = headers(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(session_token(&h).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let h = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "admin-token=from-cookie"),
        ]);
        assert_eq!(session_token(&h).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn no_token() {
        assert!(session_token(&headers(&[("cookie", "admin-token=")])).is_none());
        assert!(session_token(&headers(&[("authorization", "Basic xyz")])).is_none());
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn cookie_attributes() {
        assert_eq!(
            session_cookie("tok", 86400, false),
            "admin-token=tok; HttpOnly; SameSite=Strict; Path=/; Max-Age=86400"
        );
        assert!(session_cookie("tok", 86400, true).ends_with("; Secure"));
        assert!(expired_session_cookie(false).contains("Max-Age=0"));
    }
}
