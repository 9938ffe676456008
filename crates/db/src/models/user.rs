//! User entity models.
//!
//! Users are created only by the seed step; there is no create or update DTO.

use serde::Serialize;
use sqlx::FromRow;
use userdir_core::types::{DbId, Timestamp};

/// A row of the user listing. Omits `updated_at`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: String,
    pub initials: Option<String>,
    pub email: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: String,
    pub initials: Option<String>,
    pub email: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

/// Every user, newest first, and when the listing started.
#[derive(Debug, Clone)]
pub struct UserListing {
    pub users: Vec<UserSummary>,
    /// Epoch milliseconds. Reset to just after schema initialization when the
    /// listing had to create the tables, so elapsed time excludes that work.
    pub started_at_ms: i64,
}
