//! Route definitions for the account pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::{auth, dashboard};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::home))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/logout", get(auth::logout))
}
