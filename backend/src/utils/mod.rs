//! Shared helpers: session tokens, session cookies and password hashing.

pub mod cookies;
pub mod jwt;
pub mod password;
