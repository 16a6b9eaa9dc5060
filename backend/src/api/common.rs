//! Response envelope and error conversion for HTTP handlers.
//!
//! Every JSON body uses [`ApiResponse`]:
//! - `success`: whether the request succeeded
//! - `data`: payload on success (a view model for page routes)
//! - `message`: human-readable summary
//! - `error`: machine-readable category on failure
//!
//! [`service_error_to_http`] maps the errors a handler cannot render as a
//! view onto a 500. Validation and credential failures are always shown on
//! the page that was submitted, so there is no client-error status here.

use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::Serialize;

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts a service error into a status code and JSON body.
///
/// Every failure is logged and reported as a 500 without its underlying
/// cause.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let error_type = match &error {
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            "database_error"
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            "internal_error"
        }
        unrendered => {
            tracing::error!("Unrendered service error: {}", unrendered);
            "internal_error"
        }
    };

    let error_response = ApiResponse::<()>::error("Internal server error", error_type);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::to_string(&error_response).unwrap_or_default(),
    )
}
