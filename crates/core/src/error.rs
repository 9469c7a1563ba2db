/// Failures a user can fix by resubmitting the signup or login form.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Submitted credentials did not pass boundary validation. The message is
    /// safe to show to the user as-is.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested username is already registered.
    #[error("Username already exists: {username}")]
    UsernameTaken { username: String },
}

impl CoreError {
    /// Message suitable for rendering back to the end user.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(msg) => msg.clone(),
            CoreError::UsernameTaken { .. } => "Username already exists".to_string(),
        }
    }
}
