//! Signup/login web server library.
//!
//! Exposes config, state, sessions, handlers, and the router builder so the
//! binary and the integration tests share one construction path.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;
