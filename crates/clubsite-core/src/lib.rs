//! Business logic and repository trait definitions for the club site.
//!
//! This crate defines the "ports" (repository traits, completion gateway,
//! credential primitives) that the infrastructure layer implements, plus the
//! chat-assistant pipeline. It depends only on `clubsite-types` -- never on
//! `clubsite-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;
