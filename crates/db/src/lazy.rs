//! Lazy schema initialization with a single retry.
//!
//! A query that fails because its target table is missing triggers
//! [`schema::ensure_schema_and_seed`] and is then re-issued once. The loop
//! below attempts at most one initialization; a table still missing after it
//! is returned to the caller.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::DbError;
use crate::schema;
use crate::DbPool;

/// A query result, plus when the schema was initialized on its behalf.
#[derive(Debug)]
pub struct Initialized<T> {
    pub value: T,
    /// Set when this call created and seeded the schema; the instant the
    /// initialization finished.
    pub initialized_at: Option<DateTime<Utc>>,
}

/// Run `op`, initializing the schema once if `table` turns out to be missing.
///
/// Errors other than a missing `table` propagate unchanged. So does a missing
/// relation with a different name, since seeding cannot fix it.
///
/// A failed initialization is not returned straight away: a concurrent
/// caller may have won the race and committed the schema, so `op` is re-run
/// once. Only if the table is still missing after that does the caller get
/// [`DbError::SchemaInitialization`].
pub async fn with_schema<T, F, Fut>(
    pool: &DbPool,
    table: &str,
    mut op: F,
) -> Result<Initialized<T>, DbError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempted = false;
    let mut initialized_at = None;
    let mut init_error = None;

    loop {
        let err = match op().await {
            Ok(value) => {
                return Ok(Initialized {
                    value,
                    initialized_at,
                })
            }
            Err(err) => DbError::from(err),
        };

        if !err.is_missing_relation(table) {
            return Err(err);
        }

        if attempted {
            if let Some(init_err) = init_error {
                tracing::error!(table, error = %init_err, "Schema initialization failed");
                return Err(DbError::SchemaInitialization(init_err));
            }
            tracing::error!(table, "Relation still missing after schema initialization");
            return Err(err);
        }
        attempted = true;

        tracing::warn!(table, "Relation does not exist, creating schema and seeding");
        match schema::ensure_schema_and_seed(pool).await {
            Ok(()) => initialized_at = Some(Utc::now()),
            Err(e) => {
                tracing::warn!(
                    table,
                    error = %e,
                    "Schema initialization failed, retrying in case another caller initialized it"
                );
                init_error = Some(e);
            }
        }
    }
}
