//! Global application error types.
//!
//! This module defines the error types shared by the repository, service and
//! handler layers, and the conversions between them.

use thiserror::Error;

/// Errors raised by the credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique constraint on `users.username` rejected an insert.
    #[error("username already exists")]
    DuplicateUsername,
    /// Any other driver or constraint failure.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Service-level error used by the authentication flow.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// User-correctable input problems, in the order they were detected.
    #[error("Validation error: {}", .messages.join(", "))]
    Validation { messages: Vec<String> },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    /// Unknown user or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateUsername => Self::already_exists("User", "username"),
            StoreError::Storage(source) => Self::Database {
                source: anyhow::Error::new(source),
            },
        }
    }
}
