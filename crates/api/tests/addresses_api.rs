//! HTTP-level tests for the nested address endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

fn address_body(address_type: &str, valid_from: &str) -> serde_json::Value {
    json!({
        "address_type": address_type,
        "valid_from": valid_from,
        "post_code": "10115",
        "city": "Berlin",
        "country_code": "deu",
        "street": "Invalidenstrasse",
        "building_number": "44"
    })
}

#[sqlx::test(migrations = false)]
async fn seeded_user_has_a_home_address(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/2/addresses").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["address_type"], "HOME");
    assert_eq!(data[0]["city"], "Sample City");
}

#[sqlx::test(migrations = false)]
async fn create_address_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/users/1/addresses",
        address_body("WORK", "2025-03-01T08:30:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], 1);
    assert_eq!(json["data"]["country_code"], "DEU");
    assert_eq!(json["data"]["valid_from"], "2025-03-01T08:30:00");

    let app = common::build_test_app(pool);
    let listed = body_json(get(app, "/api/v1/users/1/addresses").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = false)]
async fn duplicate_address_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/users/1/addresses",
        address_body("WORK", "2025-03-01"),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/1/addresses",
        address_body("WORK", "2025-03-01"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = false)]
async fn create_for_unknown_user_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/999999/addresses",
        address_body("WORK", "2025-03-01"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn invalid_country_code_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = address_body("WORK", "2025-03-01");
    body["country_code"] = json!("DE");

    let response = post_json(app, "/api/v1/users/1/addresses", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = false)]
async fn unknown_address_type_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/1/addresses",
        address_body("HOLIDAY", "2025-03-01"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = false)]
async fn malformed_valid_from_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/1/addresses",
        address_body("WORK", "first of march"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = false)]
async fn edit_moves_address_to_new_key(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/users/1/addresses",
        address_body("WORK", "2025-03-01"),
    )
    .await;

    let mut body = address_body("INVOICE", "2026-01-01");
    body["old_address_type"] = json!("WORK");
    body["old_valid_from"] = json!("2025-03-01");
    let app = common::build_test_app(pool.clone());
    let response = put_json(app, "/api/v1/users/1/addresses", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["address_type"], "INVOICE");

    let app = common::build_test_app(pool);
    let listed = body_json(get(app, "/api/v1/users/1/addresses").await).await;
    let types: Vec<_> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["address_type"].as_str().unwrap().to_string())
        .collect();
    assert!(types.contains(&"INVOICE".to_string()));
    assert!(!types.contains(&"WORK".to_string()));
}

#[sqlx::test(migrations = false)]
async fn edit_with_unknown_old_key_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    get(app, "/api/v1/users/1/addresses").await;

    let mut body = address_body("WORK", "2026-01-01");
    body["old_address_type"] = json!("WORK");
    body["old_valid_from"] = json!("1990-01-01");
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/v1/users/1/addresses", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn delete_returns_204_and_removes_the_type(pool: PgPool) {
    // Deletes do not create the schema, so load it first.
    let app = common::build_test_app(pool.clone());
    get(app, "/api/v1/users").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/users/1/addresses/HOME").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let listed = body_json(get(app, "/api/v1/users/1/addresses").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
async fn delete_unknown_type_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    get(app, "/api/v1/users").await;

    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/users/1/addresses/PARKING").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
