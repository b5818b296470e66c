//! Chat endpoint for the site-wide assistant widget.

use axum::Json;
use axum::extract::State;

use clubsite_types::chat::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chat - Answer one message using the site content as context.
///
/// Stateless: the client sends its own recent history with every message.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state.chat.respond(body).await?;
    Ok(Json(reply))
}
