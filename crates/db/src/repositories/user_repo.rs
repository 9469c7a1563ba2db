//! Repository for the `users` table.

use signup_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, created_at";

/// Unique constraint guarding `users.username`.
pub const USERNAME_CONSTRAINT: &str = "uq_users_username";

/// Provides the create and lookup operations needed for signup and login.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user inside a transaction, returning the created row.
    ///
    /// The transaction is rolled back explicitly if the insert fails, so a
    /// failed signup never leaves partial state behind.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(user) => {
                tx.commit().await?;
                Ok(user)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Failed to roll back user insert");
                }
                Err(err)
            }
        }
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Whether a user with this exact username is already registered.
    ///
    /// This is a plain read: a concurrent signup may insert the same name
    /// between this check and [`UserRepo::create`]. The unique constraint
    /// rejects the second insert; see [`is_username_conflict`].
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Count rows with the given username. Always 0 or 1 while the unique
    /// constraint is in place.
    pub async fn count_by_username(pool: &PgPool, username: &str) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

/// Whether `err` is a PostgreSQL unique violation (SQLSTATE 23505) on
/// [`USERNAME_CONSTRAINT`].
pub fn is_username_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(USERNAME_CONSTRAINT)
        }
        _ => false,
    }
}
