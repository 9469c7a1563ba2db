use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::SessionSigner;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything non-trivial sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: signup_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Cookie signing key (derived from `SECRET_KEY`) and session settings.
    pub sessions: Arc<SessionSigner>,
}

impl AppState {
    /// Build state from a pool and loaded configuration.
    pub fn new(pool: signup_db::DbPool, config: ServerConfig) -> Self {
        let sessions = SessionSigner::new(&config.secret_key, config.session.clone());
        Self {
            pool,
            config: Arc::new(config),
            sessions: Arc::new(sessions),
        }
    }
}
