//! HTTP layer: public pages, the chat endpoint, admin auth and the admin
//! JSON API.

pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod response;
pub mod router;
pub mod views;
