//! Defines the HTTP routes for authentication.
//!
//! Registration, login and logout, mounted at the application root.

use crate::auth::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}
