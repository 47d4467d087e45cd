pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// POST /register     create an account (public)
/// POST /login        authenticate, set session cookie (public)
/// GET  /logout       clear session cookie (public)
/// GET  /authcheck    validate cookie, return profile (requires auth)
///
/// GET  /users        list all users (requires admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication flow (register, login, logout, authcheck).
        .merge(auth::router())
        // User listing (admin only).
        .merge(users::router())
}
