//! Handlers for the home, signup, login, and logout pages.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use signup_core::credentials::{Credentials, REQUIRED_MESSAGE};
use signup_core::error::CoreError;
use signup_db::models::user::CreateUser;
use signup_db::repositories::{is_username_conflict, UserRepo};

use crate::auth::password::{hash_password, verify_login};
use crate::error::AppResult;
use crate::session::Session;
use crate::state::AppState;
use crate::views;

pub const SIGNUP_SUCCESS: &str = "Account created successfully! Please log in.";
pub const SIGNUP_FAILED: &str = "An error occurred while creating your account. Please try again.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const LOGGED_OUT: &str = "You have been logged out";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /signup` and `POST /login`.
///
/// Fields are optional on the wire so a missing field becomes a validation
/// message. Bodies that cannot be decoded at all (wrong content type,
/// repeated fields) are answered by re-rendering the form too.
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// The home page is the login form.
pub async fn home(mut session: Session) -> (Session, Html<String>) {
    let messages = session.take_flashes();
    (session, views::login_page(&messages))
}

/// GET /signup
pub async fn signup_form(mut session: Session) -> (Session, Html<String>) {
    let messages = session.take_flashes();
    (session, views::signup_page(&messages))
}

/// POST /signup
///
/// Validate, reject known usernames, hash, insert, then redirect to the
/// login page. Every user-facing failure re-renders the form.
pub async fn signup(
    State(state): State<AppState>,
    mut session: Session,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AppResult<(Session, Response)> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected signup form body");
            return Ok(render_signup(session, REQUIRED_MESSAGE));
        }
    };
    let credentials = match Credentials::parse(form.username, form.password) {
        Ok(credentials) => credentials,
        Err(err) => return Ok(render_signup(session, err.user_message())),
    };

    // Check-then-insert is not atomic; `uq_users_username` catches the race.
    if UserRepo::username_exists(&state.pool, &credentials.username).await? {
        let taken = CoreError::UsernameTaken {
            username: credentials.username,
        };
        return Ok(render_signup(session, taken.user_message()));
    }

    let input = CreateUser {
        username: credentials.username,
        password_hash: hash_password(&credentials.password)?,
    };

    match UserRepo::create(&state.pool, &input).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "User created");
            session.flash(SIGNUP_SUCCESS);
            Ok((session, Redirect::to("/login").into_response()))
        }
        Err(err) if is_username_conflict(&err) => {
            let taken = CoreError::UsernameTaken {
                username: input.username,
            };
            tracing::info!(error = %taken, "Concurrent signup for the same username");
            Ok(render_signup(session, taken.user_message()))
        }
        Err(err) => {
            tracing::error!(error = %err, username = %input.username, "Failed to create user");
            Ok(render_signup(session, SIGNUP_FAILED))
        }
    }
}

/// GET /login
pub async fn login_form(session: Session) -> (Session, Html<String>) {
    home(session).await
}

/// POST /login
///
/// On success the session carries the user id and the browser is sent to the
/// dashboard. Any failure leaves the session unauthenticated.
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AppResult<(Session, Response)> {
    let Ok(Form(form)) = form else {
        return Ok(render_login(session, INVALID_CREDENTIALS));
    };
    let Ok(credentials) = Credentials::parse(form.username, form.password) else {
        return Ok(render_login(session, INVALID_CREDENTIALS));
    };

    let user = UserRepo::find_by_username(&state.pool, &credentials.username).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
    let valid = verify_login(&credentials.password, stored_hash)?;

    match user {
        Some(user) if valid => {
            tracing::info!(user_id = user.id, "User logged in");
            session.log_in(user.id);
            session.flash(format!("Welcome {}!", user.username));
            Ok((session, Redirect::to("/dashboard").into_response()))
        }
        _ => {
            tracing::info!(username = %credentials.username, "Failed login attempt");
            Ok(render_login(session, INVALID_CREDENTIALS))
        }
    }
}

/// GET /logout
///
/// Always succeeds, whether or not anyone was logged in.
pub async fn logout(mut session: Session) -> (Session, Redirect) {
    if let Some(user_id) = session.user_id() {
        tracing::info!(user_id, "User logged out");
    }
    session.log_out();
    session.flash(LOGGED_OUT);
    (session, Redirect::to("/"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Re-render the signup form with pending flashes plus an inline message.
fn render_signup(mut session: Session, message: impl Into<String>) -> (Session, Response) {
    let mut messages = session.take_flashes();
    messages.push(message.into());
    (session, views::signup_page(&messages).into_response())
}

fn render_login(mut session: Session, message: impl Into<String>) -> (Session, Response) {
    let mut messages = session.take_flashes();
    messages.push(message.into());
    (session, views::login_page(&messages).into_response())
}
