//! Infrastructure layer for the club site.
//!
//! Implements the ports defined in `clubsite-core`: SQLite repositories,
//! Argon2id password hashing, HMAC-SHA256 session tokens and the
//! OpenAI-compatible completion gateway. Also loads `clubsite.toml`.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod sqlite;
