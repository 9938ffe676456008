//! User status constants.
//!
//! These must match the `status` check constraint on the `users` table.

pub const USER_STATUS_ACTIVE: &str = "ACTIVE";
pub const USER_STATUS_INACTIVE: &str = "INACTIVE";

/// All valid user statuses.
pub const VALID_USER_STATUSES: &[&str] = &[USER_STATUS_ACTIVE, USER_STATUS_INACTIVE];
