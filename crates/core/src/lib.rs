//! Domain types shared by the signup database and HTTP layers.

pub mod credentials;
pub mod error;
pub mod types;
