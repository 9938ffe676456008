//! Route definitions for users and their addresses.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                                list
/// GET    /{id}                            get
/// GET    /{id}/addresses                  list_addresses
/// POST   /{id}/addresses                  create_address
/// PUT    /{id}/addresses                  edit_address
/// DELETE /{id}/addresses/{address_type}   delete_addresses
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/{id}", get(users::get))
        .route(
            "/{id}/addresses",
            get(users::list_addresses)
                .post(users::create_address)
                .put(users::edit_address),
        )
        .route(
            "/{id}/addresses/{address_type}",
            delete(users::delete_addresses),
        )
}
