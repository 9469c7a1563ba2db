pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// GET        /            -> home (login form)
/// GET, POST  /signup      -> signup form / create account
/// GET, POST  /login       -> login form / authenticate
/// GET        /dashboard   -> dashboard (requires session)
/// GET        /logout      -> logout
/// GET        /health      -> service + database health
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new().merge(auth::router()).merge(health::router())
}
