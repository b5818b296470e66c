//! The chat assistant pipeline.
//!
//! [`service::ChatService`] drives one turn: [`context`] snapshots site
//! content, [`prompt`] assembles the upstream request, and [`markup`] turns
//! the model's reply into renderable segments. [`session`] models the
//! widget that talks to it.

pub mod context;
pub mod markup;
pub mod prompt;
pub mod service;
pub mod session;
