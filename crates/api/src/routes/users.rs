//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at the application root.
///
/// ```text
/// GET /users  -> list_users (requires admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(users::list_users))
}
