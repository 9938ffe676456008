//! Repository for the `users` table.

use sqlx::PgPool;
use userdir_core::types::DbId;

use crate::models::user::{User, UserSummary};

/// Columns of the listing form.
const SUMMARY_COLUMNS: &str = "id, first_name, last_name, initials, email, status, created_at";

/// Provides read access to users.
pub struct UserRepo;

impl UserRepo {
    /// List all users ordered by most recently created first.
    ///
    /// Seeded users share one `created_at`, so ties fall back to newest ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, UserSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS}, updated_at FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
