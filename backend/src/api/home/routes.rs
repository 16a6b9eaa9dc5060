//! Defines the HTTP route for the landing page.

use super::handlers::home;
use axum::{Router, routing::get};

pub fn home_router() -> Router {
    Router::new().route("/", get(home))
}
