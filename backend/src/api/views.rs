//! View models for page routes.
//!
//! Pages are not rendered here. Each page route responds with the name of
//! the template to show and its locals (`errors` and the signed-in `user`),
//! wrapped in the standard [`ApiResponse`] envelope.

use crate::api::common::ApiResponse;
use crate::auth::models::SessionUser;
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Homepage,
    Dashboard,
    Login,
}

#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub template: Template,
    pub errors: Vec<String>,
    pub user: Option<SessionUser>,
}

impl View {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            errors: Vec::new(),
            user: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_user(mut self, user: Option<SessionUser>) -> Self {
        self.user = user;
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let message = format!("Rendered {:?}", self.template);
        Json(ApiResponse::success(self, message)).into_response()
    }
}
