//! Handler functions for authentication endpoints.
//!
//! These functions parse form submissions, call `auth::service` for the
//! business logic, and turn the outcome into either a redirect carrying the
//! session cookie or a re-rendered view listing what went wrong.

use crate::api::common::service_error_to_http;
use crate::api::views::{Template, View};
use crate::auth::models::*;
use crate::auth::service::{AuthService, AuthSettings};
use crate::errors::ServiceError;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Form},
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;

type FormFields = Vec<(String, String)>;

/// Redirect home, setting or clearing the session cookie.
fn redirect_home_with_cookie(
    cookie: Result<axum::http::HeaderValue, ServiceError>,
) -> Result<Response, (StatusCode, String)> {
    let cookie = cookie.map_err(service_error_to_http)?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

/// Renders the login form.
pub async fn login_page(Extension(session): Extension<Option<Claims>>) -> View {
    View::new(Template::Login).with_user(session.as_ref().map(SessionUser::from))
}

/// Handle registration form submission
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(settings): Extension<AuthSettings>,
    Extension(session): Extension<Option<Claims>>,
    Form(fields): Form<FormFields>,
) -> Result<Response, (StatusCode, String)> {
    let request = RegisterRequest::from_pairs(&fields);
    let auth_service = AuthService::new(&pool, &settings);

    match auth_service.register(request).await {
        Ok(issued) => {
            tracing::debug!("Session issued for new user {}", issued.user.username);
            redirect_home_with_cookie(settings.cookie.issue(&issued.token))
        }
        Err(ServiceError::Validation { messages }) => {
            tracing::debug!("Registration rejected: {}", messages.join(", "));
            Ok(View::new(Template::Homepage)
                .with_errors(messages)
                .with_user(session.as_ref().map(SessionUser::from))
                .into_response())
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle login form submission
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(settings): Extension<AuthSettings>,
    Extension(session): Extension<Option<Claims>>,
    Form(fields): Form<FormFields>,
) -> Result<Response, (StatusCode, String)> {
    let request = LoginRequest::from_pairs(&fields);
    let auth_service = AuthService::new(&pool, &settings);

    match auth_service.login(request).await {
        Ok(issued) => {
            tracing::debug!("Session issued for user {}", issued.user.username);
            redirect_home_with_cookie(settings.cookie.issue(&issued.token))
        }
        Err(ServiceError::InvalidCredentials) => {
            tracing::info!("Failed login attempt");
            Ok(View::new(Template::Login)
                .with_errors(vec![INVALID_CREDENTIALS_MESSAGE.to_string()])
                .with_user(session.as_ref().map(SessionUser::from))
                .into_response())
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout: drop the session cookie. Issued tokens stay valid until
/// they expire.
pub async fn logout(
    Extension(settings): Extension<AuthSettings>,
) -> Result<Response, (StatusCode, String)> {
    redirect_home_with_cookie(settings.cookie.clear())
}
