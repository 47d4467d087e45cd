//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;

use hirehub_db::models::user::UserResponse;
use hirehub_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /users
///
/// List all users. Admin-only; every entry is sanitized. Answers 404 when
/// the store holds no users at all.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    if users.is_empty() {
        return Err(AppError::NotFound("No users found".to_string()));
    }

    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}
