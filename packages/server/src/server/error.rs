//! Mapping of domain errors onto HTTP responses.
//!
//! The same `ApiError` backs GraphQL field errors through its `Display`, so
//! both surfaces show clients identical, generic messages. Server-side causes
//! are logged here and go no further.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::common::AuthError;
use crate::domains::auth::LoginError;
use crate::domains::users::UserError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Body could not be parsed as the expected JSON
    pub fn invalid_payload() -> Self {
        Self::bad_request("Invalid request payload")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<LoginError> for ApiError {
    fn from(e: LoginError) -> Self {
        let status = match &e {
            LoginError::Validation(_) => StatusCode::BAD_REQUEST,
            e if e.is_rejection() => StatusCode::UNAUTHORIZED,
            _ => {
                error!(error = ?e, "Login request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.public_message())
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        let status = match &e {
            UserError::Validation(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Conflict => StatusCode::CONFLICT,
            UserError::Store(cause) => {
                error!(error = ?cause, "User store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match e {
            AuthError::AdminRequired => StatusCode::FORBIDDEN,
            AuthError::AuthenticationRequired | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
        };
        Self::new(status, e.to_string())
    }
}
