//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use hirehub_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash and the activation OTP -- NEVER serialize this
/// to API responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub location: String,
    pub otp: Option<String>,
    pub otp_expiry: Option<Timestamp>,
    pub is_activated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no hash, no OTP).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub role: String,
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub location: String,
    pub is_activated: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            contact: user.contact.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            company: user.company.clone(),
            company_size: user.company_size.clone(),
            location: user.location.clone(),
            is_activated: user.is_activated,
        }
    }
}

/// DTO for creating a new user. The password arrives here already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub location: String,
    pub otp: Option<String>,
    pub otp_expiry: Option<Timestamp>,
}
