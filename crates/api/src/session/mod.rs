//! Cookie-carried, server-signed sessions.
//!
//! [`Session`] is a request-scoped extractor: handlers take it as an
//! argument, mutate it, and hand it back as part of their response, at which
//! point it is written into a [`SignedCookieJar`]. Nothing is stored
//! server-side; the jar's signature is what makes the cookie trustworthy.

pub mod signer;

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use signup_core::types::DbId;

pub use signer::SessionSigner;

use crate::state::AppState;

/// Reasons a session cookie is discarded.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session cookie signature mismatch")]
    BadSignature,

    #[error("malformed session cookie")]
    Malformed,

    #[error("session cookie expired")]
    Expired,

    #[error("session payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Everything a session cookie carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Authenticated user, set on login and removed on logout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,
    /// One-shot notices to show on the next rendered page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<String>,
    /// Unix timestamp of the last write, used for expiry.
    pub issued_at: i64,
}

impl SessionData {
    fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.flashes.is_empty()
    }
}

/// The current request's session.
pub struct Session {
    data: SessionData,
    jar: SignedCookieJar,
    signer: Arc<SessionSigner>,
    modified: bool,
}

impl Session {
    /// Load the session from request headers.
    ///
    /// A missing, tampered, or expired cookie yields an empty session. An
    /// invalid cookie also marks the session modified so the response
    /// removes it from the browser.
    pub fn from_headers(headers: &HeaderMap, signer: Arc<SessionSigner>, now: i64) -> Self {
        let name = signer.config().cookie_name.as_str();
        let jar = SignedCookieJar::from_headers(headers, signer.key().clone());

        let loaded = if CookieJar::from_headers(headers).get(name).is_none() {
            Ok(None)
        } else {
            match jar.get(name) {
                Some(cookie) => signer.decode(cookie.value(), now).map(Some),
                None => Err(SessionError::BadSignature),
            }
        };

        let (data, modified) = match loaded {
            Ok(Some(data)) => (data, false),
            Ok(None) => (SessionData::default(), false),
            Err(e) => {
                tracing::debug!(error = %e, "Discarding invalid session cookie");
                (SessionData::default(), true)
            }
        };

        Self {
            data,
            jar,
            signer,
            modified,
        }
    }

    /// The logged-in user, if any.
    pub fn user_id(&self) -> Option<DbId> {
        self.data.user_id
    }

    /// Replace the session contents with an authenticated identity.
    pub fn log_in(&mut self, user_id: DbId) {
        self.data.user_id = Some(user_id);
        self.data.flashes.clear();
        self.modified = true;
    }

    /// Forget the authenticated identity. Pending flashes are kept.
    pub fn log_out(&mut self) {
        self.data.user_id = None;
        self.modified = true;
    }

    /// Queue a notice for the next rendered page.
    pub fn flash(&mut self, message: impl Into<String>) {
        self.data.flashes.push(message.into());
        self.modified = true;
    }

    /// Remove and return all pending notices.
    pub fn take_flashes(&mut self) -> Vec<String> {
        if self.data.flashes.is_empty() {
            return Vec::new();
        }
        self.modified = true;
        std::mem::take(&mut self.data.flashes)
    }

    /// Write the current state into the jar: a fresh signed cookie, or a
    /// removal cookie once nothing is left to carry.
    fn into_jar(mut self, now: i64) -> SignedCookieJar {
        let config = self.signer.config().clone();
        let removal = Cookie::build((config.cookie_name.clone(), "")).path("/");

        if self.data.is_empty() {
            return self.jar.remove(removal);
        }

        self.data.issued_at = now;
        match self.signer.encode(&self.data) {
            Ok(value) => self.jar.add(
                Cookie::build((config.cookie_name, value))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Strict)
                    .secure(config.secure)
                    .max_age(time::Duration::seconds(config.ttl_secs)),
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode session; clearing cookie");
                self.jar.remove(removal)
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("data", &self.data)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let now = chrono::Utc::now().timestamp();
        Ok(Session::from_headers(
            &parts.headers,
            Arc::clone(&state.sessions),
            now,
        ))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Infallible> {
        if !self.modified {
            return Ok(res);
        }
        self.into_jar(chrono::Utc::now().timestamp())
            .into_response_parts(res)
    }
}
