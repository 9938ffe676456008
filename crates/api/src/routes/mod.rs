pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users                                  list (paginated)
/// /users/{id}                             get
/// /users/{id}/addresses                   list, create, edit
/// /users/{id}/addresses/{address_type}    delete every version of a type
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/users", users::router())
}
