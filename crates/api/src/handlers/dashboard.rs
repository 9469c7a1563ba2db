//! Handler for the authenticated dashboard page.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use signup_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::session::Session;
use crate::state::AppState;
use crate::views;

pub const LOGIN_REQUIRED: &str = "Please log in first";

/// GET /dashboard
///
/// Anonymous visitors are redirected home. A session pointing at a user that
/// no longer exists is treated the same way and cleared.
pub async fn dashboard(
    State(state): State<AppState>,
    mut session: Session,
) -> AppResult<(Session, Response)> {
    let Some(user_id) = session.user_id() else {
        session.flash(LOGIN_REQUIRED);
        return Ok((session, Redirect::to("/").into_response()));
    };

    let Some(user) = UserRepo::find_by_id(&state.pool, user_id).await? else {
        tracing::warn!(user_id, "Session refers to a missing user");
        session.log_out();
        session.flash(LOGIN_REQUIRED);
        return Ok((session, Redirect::to("/").into_response()));
    };

    let messages = session.take_flashes();
    Ok((session, views::dashboard_page(&user.username, &messages).into_response()))
}
