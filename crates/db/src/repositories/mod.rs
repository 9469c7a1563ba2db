mod user_repo;

pub use user_repo::{is_username_conflict, UserRepo, USERNAME_CONSTRAINT};
