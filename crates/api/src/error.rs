use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::auth::password::PasswordHashError;

/// Fixed body for unknown routes.
pub const NOT_FOUND_BODY: &str = "Page Not Found";

/// Fixed body for any unhandled server error.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Application-level error type for HTTP handlers.
///
/// User-recoverable problems (bad form input, taken usernames, wrong
/// passwords) never reach this type; handlers render those inline. What does
/// reach it is an infrastructure failure, logged and answered with the fixed
/// 500 body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Password(#[from] PasswordHashError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Server Error");
        fixed_response(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Plaintext response with the fixed body for `status`.
pub fn fixed_response(status: StatusCode) -> Response {
    let body = if status == StatusCode::NOT_FOUND {
        NOT_FOUND_BODY
    } else {
        INTERNAL_ERROR_BODY
    };
    (status, body).into_response()
}
