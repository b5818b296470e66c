//! Credential adapters for the admin auth service.
//!
//! - `password`: Argon2id password hashing (PHC strings)
//! - `token`: HS256 signed session tokens

pub mod password;
pub mod token;
