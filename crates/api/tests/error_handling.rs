//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use userdir_api::error::AppError;
use userdir_core::error::CoreError;
use userdir_db::{ConstraintKind, DbError};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn violation(kind: ConstraintKind, message: &str) -> AppError {
    AppError::from(DbError::ConstraintViolation {
        kind,
        constraint: Some("users_addresses_pkey".into()),
        message: message.into(),
    })
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("User", 42));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "User 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("City must be 1 to 60 characters".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "City must be 1 to 60 characters");
}

#[tokio::test]
async fn core_error_inside_db_error_keeps_its_status() {
    let err = AppError::from(DbError::Core(CoreError::Validation("bad".into())));
    assert!(matches!(err, AppError::Core(_)));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid path segment".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid path segment");
}

#[tokio::test]
async fn unique_violation_returns_409_with_server_message() {
    let message = "duplicate key value violates unique constraint \"users_addresses_pkey\"";
    let (status, json) = error_to_response(violation(ConstraintKind::Unique, message)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], message);
}

#[tokio::test]
async fn foreign_key_violation_returns_409() {
    let (status, json) = error_to_response(violation(
        ConstraintKind::ForeignKey,
        "insert or update on table \"users_addresses\" violates foreign key constraint",
    ))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn check_and_not_null_violations_return_400() {
    for kind in [ConstraintKind::Check, ConstraintKind::NotNull] {
        let (status, json) = error_to_response(violation(kind, "rejected")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"], "rejected");
    }
}

#[tokio::test]
async fn missing_relation_returns_500_without_details() {
    let err = AppError::from(DbError::RelationNotFound {
        table: "users_addresses".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("users_addresses"));
}

#[tokio::test]
async fn failed_schema_initialization_returns_500() {
    let err = AppError::from(DbError::SchemaInitialization(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn other_storage_errors_return_500() {
    let err = AppError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
