//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Terminal rejection produced by the auth gate.
///
/// Every failure inside the gate collapses into one of these; the
/// display text is the message shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication token is required")]
    MissingCredential,

    #[error("Invalid token")]
    InvalidCredential,

    #[error("Token expired")]
    CredentialExpired,

    /// Same rejection whether the row is missing or deactivated.
    #[error("User not found or deactivated")]
    UserNotFoundOrInactive,

    #[error("Server Error")]
    Internal,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::InvalidCredential => "INVALID_TOKEN",
            AuthError::CredentialExpired => "TOKEN_EXPIRED",
            AuthError::UserNotFoundOrInactive => "USER_NOT_FOUND",
            AuthError::Internal => "AUTH_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (self.status_code(), body).into_response()
    }
}
