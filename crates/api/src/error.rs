use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use userdir_core::error::CoreError;
use userdir_db::{ConstraintKind, DbError};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for storage errors,
/// and adds a variant for undecodable requests. Implements [`IntoResponse`]
/// to produce consistent `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `userdir_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A classified storage error.
    #[error(transparent)]
    Database(DbError),

    /// A request that could not be decoded (bad path segment or JSON body).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Domain errors travelling inside a `DbError` surface as `Core`.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            other => AppError::Database(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Database(err) => classify_db_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, key } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} {key} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
    }
}

/// Map a storage error to an HTTP status, error code, and message.
///
/// - Unique and foreign key violations map to 409 with the server message.
/// - Check and not-null violations map to 400 with the server message.
/// - A failed schema initialization, a table that is still missing after
///   it, and anything else map to 500 with a sanitized message.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, String) {
    match err {
        DbError::ConstraintViolation { kind, message, .. } => match kind {
            ConstraintKind::Unique | ConstraintKind::ForeignKey => {
                (StatusCode::CONFLICT, "CONFLICT", message.clone())
            }
            ConstraintKind::Check | ConstraintKind::NotNull => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
        },
        DbError::Core(core) => classify_core_error(core),
        DbError::RelationNotFound { table } => {
            tracing::error!(table = %table, "Relation missing after schema initialization");
            internal()
        }
        DbError::SchemaInitialization(err) | DbError::Sqlx(err) => {
            tracing::error!(error = %err, "Database error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}
