//! Domain services orchestrating repositories and credential primitives.

pub mod auth;
pub mod body;
pub mod content;
pub mod credentials;
