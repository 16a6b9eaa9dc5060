//! Authentication module for registration, login, logout and sessions.
//!
//! This module provides the form handlers, the session middleware that
//! resolves the signed-in user on every request, and the service that ties
//! validation, password hashing and token issuance together.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
