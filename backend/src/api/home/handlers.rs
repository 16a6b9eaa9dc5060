//! Handler for the landing page.
//!
//! `GET /` shows the dashboard to a signed-in user and the registration
//! homepage to everyone else. The session subject is looked up by id so a
//! token for a user that no longer exists is treated as anonymous.

use crate::api::common::service_error_to_http;
use crate::api::views::{Template, View};
use crate::auth::models::SessionUser;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::Claims;
use axum::{extract::Extension, http::StatusCode};
use sqlx::SqlitePool;

/// Renders the dashboard or the homepage.
pub async fn home(
    Extension(pool): Extension<SqlitePool>,
    Extension(session): Extension<Option<Claims>>,
) -> Result<View, (StatusCode, String)> {
    let Some(claims) = session else {
        return Ok(View::new(Template::Homepage));
    };

    let user = UserRepository::new(&pool)
        .get_user_by_id(claims.user_id())
        .await
        .map_err(|e| service_error_to_http(e.into()))?;

    match user {
        Some(user) => Ok(View::new(Template::Dashboard).with_user(Some(SessionUser {
            id: user.id,
            username: user.username,
        }))),
        None => {
            tracing::debug!("Session names unknown user id {}", claims.user_id());
            Ok(View::new(Template::Homepage))
        }
    }
}
