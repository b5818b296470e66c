//! Shared domain types for the club site.
//!
//! This crate contains the content entities (Role, Member, Event, Project,
//! News, Admin), the chat-assistant wire types, LLM request/response shapes,
//! site configuration, and the error enums shared across crates.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod admin;
pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod llm;

/// Normalise an optional form field: blank or whitespace-only becomes `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
