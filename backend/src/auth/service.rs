//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::cookies::SessionCookie;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordHasher;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Process-wide authentication settings, built once at startup.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt: Arc<JwtUtils>,
    pub hasher: PasswordHasher,
    pub cookie: SessionCookie,
}

impl AuthSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            jwt: Arc::new(JwtUtils::new(&config.jwt_secret)),
            hasher: PasswordHasher::new(config.bcrypt_cost),
            cookie: SessionCookie::new(config.cookie_secure),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            jwt: Arc::new(JwtUtils::new("test-signing-secret")),
            hasher: PasswordHasher::new(crate::utils::password::MIN_COST),
            cookie: SessionCookie::new(true),
        }
    }
}

/// Authentication service for handling registration and login
pub struct AuthService<'a> {
    settings: &'a AuthSettings,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    pub fn new(pool: &'a SqlitePool, settings: &'a AuthSettings) -> Self {
        Self {
            settings,
            user_service: UserService::new(pool, settings.hasher.clone()),
        }
    }

    /// Validate a registration, store the user and issue a session.
    ///
    /// # Errors
    /// `ServiceError::Validation` with every failed check, in display order.
    /// Storage failures propagate as `ServiceError::Database`.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<IssuedSession> {
        let mut errors = request.username_errors();
        if !request.username.is_empty()
            && self.user_service.username_taken(&request.username).await?
        {
            errors.push(USERNAME_TAKEN_MESSAGE.to_string());
        }
        errors.extend(request.password_errors());

        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let user = match self
            .user_service
            .create_user(&request.username, &request.password)
            .await
        {
            Ok(user) => user,
            // Lost a race with a concurrent registration for the same name.
            Err(ServiceError::AlreadyExists { .. }) => {
                warn!("Concurrent registration for username {}", request.username);
                return Err(ServiceError::validation(vec![
                    USERNAME_TAKEN_MESSAGE.to_string(),
                ]));
            }
            Err(e) => return Err(e),
        };

        info!("Registered user {} (id {})", user.username, user.id);
        self.issue_session(user.id, user.username)
    }

    /// Verify credentials and issue a session.
    ///
    /// # Errors
    /// `ServiceError::InvalidCredentials` for blank fields, an unknown user
    /// or a wrong password.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<IssuedSession> {
        if request.validate().is_err() {
            return Err(ServiceError::InvalidCredentials);
        }

        let user = self
            .user_service
            .authenticate_user(&request.username, &request.password)
            .await?;

        info!("User {} (id {}) logged in", user.username, user.id);
        self.issue_session(user.id, user.username)
    }

    fn issue_session(&self, user_id: i64, username: String) -> ServiceResult<IssuedSession> {
        let token = self.settings.jwt.generate_token(user_id, &username)?;

        Ok(IssuedSession {
            user: SessionUser {
                id: user_id,
                username,
            },
            token,
        })
    }
}
