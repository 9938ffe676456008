//! Storage error classification.
//!
//! Every `sqlx::Error` entering this crate passes through
//! [`DbError::from`], which inspects the PostgreSQL SQLSTATE so callers can
//! branch on a variant instead of on message text.

use std::fmt;

use sqlx::error::DatabaseError;
use userdir_core::error::CoreError;

/// SQLSTATE `undefined_table`.
pub const SQLSTATE_UNDEFINED_TABLE: &str = "42P01";
/// SQLSTATE `unique_violation`.
pub const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE `foreign_key_violation`.
pub const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE `check_violation`.
pub const SQLSTATE_CHECK_VIOLATION: &str = "23514";
/// SQLSTATE `not_null_violation`.
pub const SQLSTATE_NOT_NULL_VIOLATION: &str = "23502";

/// Which integrity constraint the server rejected a write with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

impl ConstraintKind {
    /// Map a SQLSTATE to a constraint kind, if it is an integrity violation.
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            SQLSTATE_UNIQUE_VIOLATION => Some(ConstraintKind::Unique),
            SQLSTATE_FOREIGN_KEY_VIOLATION => Some(ConstraintKind::ForeignKey),
            SQLSTATE_CHECK_VIOLATION => Some(ConstraintKind::Check),
            SQLSTATE_NOT_NULL_VIOLATION => Some(ConstraintKind::NotNull),
            _ => None,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::Check => "check",
            ConstraintKind::NotNull => "not-null",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Validation or lookup failure raised before or after a query.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The queried table does not exist yet.
    #[error("relation \"{table}\" does not exist")]
    RelationNotFound { table: String },

    /// The server rejected a write; `message` is the server's text verbatim.
    #[error("{kind} constraint violated: {message}")]
    ConstraintViolation {
        kind: ConstraintKind,
        constraint: Option<String>,
        message: String,
    },

    /// Creating or seeding the schema failed and the table is still missing.
    ///
    /// The underlying error is kept unclassified: a constraint violation here
    /// comes from the schema catalog or the seed, not from the caller's input.
    #[error("Schema initialization failed: {0}")]
    SchemaInitialization(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    /// True when this is a missing-relation error for exactly `table`.
    pub fn is_missing_relation(&self, table: &str) -> bool {
        matches!(self, DbError::RelationNotFound { table: t } if t == table)
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::Database(db_err) => classify(&**db_err),
            _ => None,
        };
        classified.unwrap_or(DbError::Sqlx(err))
    }
}

fn classify(db_err: &dyn DatabaseError) -> Option<DbError> {
    let code = db_err.code()?;

    if code == SQLSTATE_UNDEFINED_TABLE {
        return Some(DbError::RelationNotFound {
            table: relation_name(db_err.message()).unwrap_or_default(),
        });
    }

    ConstraintKind::from_sqlstate(&code).map(|kind| DbError::ConstraintViolation {
        kind,
        constraint: db_err.constraint().map(str::to_owned),
        message: db_err.message().to_owned(),
    })
}

/// Pull the relation out of `relation "users" does not exist`.
///
/// A schema-qualified name (`public.users`) is reduced to the bare table.
pub(crate) fn relation_name(message: &str) -> Option<String> {
    let start = message.find('"')? + 1;
    let len = message[start..].find('"')?;
    let name = &message[start..start + len];
    let table = name.rsplit('.').next().unwrap_or(name);
    (!table.is_empty()).then(|| table.to_owned())
}
