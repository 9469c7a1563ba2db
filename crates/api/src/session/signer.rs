//! Session signing key and payload encoding.
//!
//! Signing and verification are done by [`SignedCookieJar`]; this module
//! only derives its [`Key`] from the configured secret and turns
//! [`SessionData`] into a cookie-safe value (base64url JSON) and back.
//!
//! [`SignedCookieJar`]: axum_extra::extract::cookie::SignedCookieJar

use axum_extra::extract::cookie::Key;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha512};

use super::{SessionData, SessionError};
use crate::config::{SecretKey, SessionConfig};

/// Tolerated clock drift for `issued_at` values slightly in the future.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Owns the cookie signing key and the session cookie settings.
#[derive(Clone)]
pub struct SessionSigner {
    key: Key,
    config: SessionConfig,
}

impl SessionSigner {
    /// `Key` wants 64 bytes of master key; a SHA-512 digest of the secret
    /// gives exactly that for secrets of any length.
    pub fn new(secret: &SecretKey, config: SessionConfig) -> Self {
        let digest = Sha512::digest(secret.as_bytes());
        Self {
            key: Key::from(digest.as_slice()),
            config,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn encode(&self, data: &SessionData) -> Result<String, SessionError> {
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(data)?))
    }

    /// Decode an already-verified cookie value. Sessions issued more than
    /// `ttl_secs` before `now` are rejected as expired.
    pub fn decode(&self, value: &str, now: i64) -> Result<SessionData, SessionError> {
        let json = URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|_| SessionError::Malformed)?;
        let data: SessionData = serde_json::from_slice(&json)?;

        let age = now - data.issued_at;
        if age > self.config.ttl_secs || age < -MAX_CLOCK_SKEW_SECS {
            return Err(SessionError::Expired);
        }

        Ok(data)
    }
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
