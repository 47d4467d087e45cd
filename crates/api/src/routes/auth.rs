//! Route definitions for the authentication flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the application root.
///
/// ```text
/// POST /register   -> register
/// POST /login      -> login
/// GET  /logout     -> logout
/// GET  /authcheck  -> authcheck (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/authcheck", get(auth::authcheck))
}
