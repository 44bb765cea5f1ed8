//! Repository for the `users` table.

use baba_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, external_uid, email, username, display_name, created_at, updated_at";

/// Provides lookup and profile operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the user for `external_uid`, creating the row on first sight.
    ///
    /// A non-`None` `email` refreshes the stored address.
    pub async fn find_or_create(
        pool: &PgPool,
        external_uid: &str,
        email: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_uid, email) \
             VALUES ($1, $2) \
             ON CONFLICT (external_uid) DO UPDATE \
                SET email = COALESCE(EXCLUDED.email, users.email) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(external_uid)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Update profile fields. Only non-`None` values are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. A taken username
    /// surfaces as a `uq_users_username` unique violation.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        username: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                display_name = COALESCE($3, display_name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(username)
            .bind(display_name)
            .fetch_optional(pool)
            .await
    }
}
