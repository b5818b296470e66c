//! Completion gateway abstraction.

pub mod box_provider;
pub mod provider;
