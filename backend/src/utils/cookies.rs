//! Session cookie formatting and parsing.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

use crate::errors::{ServiceError, ServiceResult};
use crate::utils::jwt::SESSION_LIFETIME_SECONDS;

/// Cookie name carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "WebApp";

/// Attributes applied to the session cookie.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// `Set-Cookie` value that stores `token` for the session lifetime.
    pub fn issue(&self, token: &str) -> ServiceResult<HeaderValue> {
        self.build(token, SESSION_LIFETIME_SECONDS)
    }

    /// `Set-Cookie` value that makes the browser drop the session cookie.
    pub fn clear(&self) -> ServiceResult<HeaderValue> {
        self.build("", 0)
    }

    fn build(&self, value: &str, max_age: i64) -> ServiceResult<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
            SESSION_COOKIE_NAME, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }

        HeaderValue::from_str(&cookie)
            .map_err(|e| ServiceError::internal_error(format!("Invalid cookie value: {}", e)))
    }
}

/// Extracts the session token from the request's `Cookie` headers, if any.
pub fn read_session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
