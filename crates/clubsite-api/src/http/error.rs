//! Application error type mapping to HTTP responses.
//!
//! The chat and login endpoints answer errors with a flat `{"error": "..."}`
//! body, which the chat widget and login form read. The admin JSON API uses
//! the envelope format. HTML pages render a small error page.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use clubsite_types::error::{AuthError, ChatError, ContentError};

use crate::http::response::ApiResponse;

/// Body of every upstream failure on the chat endpoint.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug)]
pub enum AppError {
    /// Admin API content errors.
    Content(ContentError),
    /// Login and session errors.
    Auth(AuthError),
    /// Chat endpoint errors.
    Chat(ChatError),
    /// Admin API request without a valid session.
    Unauthorized(String),
    Validation(String),
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        AppError::Content(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

fn flat(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Chat(ChatError::Validation(msg)) => {
                return flat(StatusCode::BAD_REQUEST, &msg);
            }
            AppError::Chat(e) => {
                tracing::error!(error = %e, "chat request failed");
                return flat(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR);
            }
            AppError::Auth(AuthError::MissingFields) => {
                return flat(StatusCode::BAD_REQUEST, "Missing fields");
            }
            AppError::Auth(
                AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::Expired,
            ) => {
                return flat(StatusCode::UNAUTHORIZED, "Invalid credentials");
            }
            AppError::Auth(e) => {
                tracing::error!(error = %e, "login failed");
                return flat(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR);
            }
            AppError::Content(ContentError::NotFound(entity)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} not found"),
            ),
            AppError::Content(ContentError::Validation(msg)) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            AppError::Content(ContentError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg)
            }
            AppError::Content(ContentError::StorageError(msg)) => {
                tracing::error!(error = %msg, "admin request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_SERVER_ERROR.to_string(),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        };

        (status, Json(ApiResponse::error(code, &message))).into_response()
    }
}

/// Error from an HTML page handler.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    Internal(String),
}

impl From<ContentError> for PageError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound(_) => PageError::NotFound,
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl From<minijinja::Error> for PageError {
    fn from(e: minijinja::Error) -> Self {
        PageError::Internal(format!("template error: {e:#}"))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title) = match self {
            PageError::NotFound => (StatusCode::NOT_FOUND, "Sayfa bulunamadı"),
            PageError::Internal(msg) => {
                tracing::error!(error = %msg, "page render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Bir hata oluştu")
            }
        };
        let body = format!(
            "<!doctype html><html lang=\"tr\"><head><meta charset=\"utf-8\"><title>{title}</title></head>\
             <body><h1>{}</h1><p>{title}</p><p><a href=\"/\">Ana Sayfa</a></p></body></html>",
            status.as_u16()
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubsite_types::llm::LlmError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_validation_is_flat_400() {
        let response =
            AppError::Chat(ChatError::Validation("Message is required".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Message is required"}));
    }

    #[tokio::test]
    async fn chat_upstream_hides_details() {
        let response = AppError::Chat(ChatError::Gateway(LlmError::AuthenticationFailed)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Internal Server Error"}));
    }

    #[tokio::test]
    async fn login_errors_are_flat() {
        let response = AppError::Auth(AuthError::MissingFields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Missing fields"}));

        let response = AppError::Auth(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({"error": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn content_errors_use_envelope() {
        let response = AppError::Content(ContentError::NotFound("member")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["code"], "NOT_FOUND");
        assert_eq!(json["errors"][0]["message"], "member not found");

        let response = AppError::Content(ContentError::Conflict("role in use".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
