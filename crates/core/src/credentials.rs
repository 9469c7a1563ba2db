//! Username/password pairs submitted on the signup and login forms.
//!
//! Raw form fields arrive as optional strings. [`Credentials::parse`] turns
//! them into a typed value once, at the request boundary, so handlers never
//! look up loosely-typed fields themselves.

use validator::Validate;

use crate::error::CoreError;

/// Maximum username length, matching the `users.username` column width.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Message shown when either field is missing or empty.
pub const REQUIRED_MESSAGE: &str = "Username and password are required";

/// A validated, non-empty username/password pair.
#[derive(Clone, Validate)]
pub struct Credentials {
    #[validate(length(max = 50, message = "Username must be at most 50 characters"))]
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from raw form fields.
    ///
    /// Both fields must be present and non-empty, and the username must fit
    /// the column width. Whitespace is preserved exactly as submitted.
    pub fn parse(username: Option<String>, password: Option<String>) -> Result<Self, CoreError> {
        let username = username.filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());

        let (Some(username), Some(password)) = (username, password) else {
            return Err(CoreError::Validation(REQUIRED_MESSAGE.to_string()));
        };

        let credentials = Self { username, password };
        credentials.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid credentials".to_string());
            CoreError::Validation(message)
        })?;

        Ok(credentials)
    }
}

// Never print the password.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
