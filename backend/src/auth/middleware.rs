//! Session middleware.
//!
//! Resolves the session cookie on every request. Authentication is advisory:
//! a missing, malformed, forged or expired token never rejects the request,
//! it just leaves the requester anonymous.

use crate::auth::service::AuthSettings;
use crate::utils::cookies::read_session_token;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Inserts `Option<Claims>` into the request extensions.
pub async fn session_auth(
    Extension(settings): Extension<AuthSettings>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims: Option<Claims> =
        read_session_token(request.headers()).and_then(|token| settings.jwt.validate_token(token));

    if let Some(claims) = &claims {
        tracing::debug!("Request from user {}", claims.user_id());
    }

    // Always insert the Option<Claims>, even if it's None
    request.extensions_mut().insert(claims);
    next.run(request).await
}
