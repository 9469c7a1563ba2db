//! Fallback and panic responses.

use std::any::Any;

use axum::http::{StatusCode, Uri};
use axum::response::Response;

use crate::error::fixed_response;

/// Fallback for unmatched routes: fixed `404 Page Not Found`.
pub async fn not_found(uri: Uri) -> Response {
    tracing::warn!(%uri, "404 Error");
    fixed_response(StatusCode::NOT_FOUND)
}

/// Panic handler for `CatchPanicLayer`: fixed `500 Internal Server Error`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Server Error");
    fixed_response(StatusCode::INTERNAL_SERVER_ERROR)
}
