//! Handlers for the `/users` resource and its nested addresses.
//!
//! Addresses have no id of their own; they are addressed by
//! `(user, address_type, valid_from)`, so edits carry the old type and date
//! in the body and deletes remove every version of a type.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use userdir_core::error::CoreError;
use userdir_core::pagination::{paginate, USERS_PAGE_SIZE};
use userdir_core::types::DbId;
use userdir_db::models::address::{EditAddress, NewAddress};

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/users?page=1
///
/// One page of users, newest first. The page is clamped to the available
/// range; a missing or non-numeric page serves page 1.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let listing = state.directory.list_users().await?;
    let total = listing.users.len();
    let window = paginate(params.page(), total, USERS_PAGE_SIZE);

    let data: Vec<_> = listing
        .users
        .into_iter()
        .skip(window.range.start)
        .take(window.range.len())
        .collect();

    Ok(Json(PageResponse {
        data,
        page: window.page,
        page_size: USERS_PAGE_SIZE,
        total,
        total_pages: window.total_pages,
        duration_ms: Utc::now().timestamp_millis() - listing.started_at_ms,
    }))
}

/// GET /api/v1/users/{id}
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let user = state.directory.get_user(id).await?;
    Ok(Json(DataResponse { data: user }))
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// GET /api/v1/users/{id}/addresses
///
/// Most recent `valid_from` first. An unknown user yields an empty list.
pub async fn list_addresses(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let addresses = state.directory.user_addresses(id).await?;
    Ok(Json(DataResponse { data: addresses }))
}

/// POST /api/v1/users/{id}/addresses
///
/// Create an address. 404 if the user does not exist, 409 if the user
/// already has an address of this type starting at the same instant.
pub async fn create_address(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    input: Result<Json<NewAddress>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let Json(input) = input?;

    state.directory.get_user(id).await?;
    let address = state.directory.create_address(id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: address })))
}

/// PUT /api/v1/users/{id}/addresses
///
/// Rewrite the address named by `old_address_type` / `old_valid_from`. The
/// key itself may change.
pub async fn edit_address(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    input: Result<Json<EditAddress>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let Json(input) = input?;

    let key = format!("{id}/{}/{}", input.old_address_type, input.old_valid_from);
    let address = state
        .directory
        .edit_address(id, input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Address", key)))?;
    Ok(Json(DataResponse { data: address }))
}

/// DELETE /api/v1/users/{id}/addresses/{address_type}
///
/// Remove every address of the type for the user, whatever its
/// `valid_from`. Deleting nothing is not an error.
pub async fn delete_addresses(
    State(state): State<AppState>,
    path: Result<Path<(DbId, String)>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path((id, address_type)) = path?;
    state.directory.delete_addresses(id, &address_type).await?;
    Ok(StatusCode::NO_CONTENT)
}
