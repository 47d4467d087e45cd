//! Handlers for the authentication flow (register, login, logout, authcheck).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use hirehub_core::error::CoreError;
use hirehub_core::validation::{
    normalize_email, validate_company_fields, validate_contact, validate_email, validate_name,
    validate_role, MIN_PASSWORD_LENGTH,
};
use hirehub_db::models::user::{CreateUser, UserResponse};
use hirehub_db::repositories::UserRepo;

use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::mailer;
use crate::middleware::auth::{AuthUser, SESSION_COOKIE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
///
/// Every field is optional at the deserialization layer so that missing and
/// empty fields produce the same 400 answer instead of a framework rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub location: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response carrying a sanitized user, returned by register, login, and
/// authcheck.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Plain message response (logout).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Validate the submitted fields, reject duplicates, hash the password,
/// persist the user, and (when SMTP is configured) send the welcome email
/// carrying the activation OTP. Returns 201 with the sanitized user.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let invalid = |msg: String| AppError::Core(CoreError::Validation(msg));

    // 1. All required fields must be present and non-empty.
    let (
        Some(name),
        Some(contact),
        Some(email),
        Some(password),
        Some(confirm_password),
        Some(role),
        Some(location),
    ) = (
        non_empty(&input.name),
        non_empty(&input.contact),
        non_empty(&input.email),
        input.password.as_deref().filter(|p| !p.is_empty()),
        input.confirm_password.as_deref().filter(|p| !p.is_empty()),
        non_empty(&input.role),
        non_empty(&input.location),
    )
    else {
        return Err(invalid("Please fill all the fields".to_string()));
    };

    // 2. Field-level validation. Email is normalized before anything else
    //    touches it so lookups and storage agree on the canonical form.
    let email = normalize_email(email);
    validate_name(name).map_err(invalid)?;
    validate_contact(contact).map_err(invalid)?;
    validate_email(&email).map_err(invalid)?;
    validate_role(role).map_err(invalid)?;
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(invalid)?;

    // 3. Password confirmation.
    if password != confirm_password {
        return Err(invalid("Passwords do not match".to_string()));
    }

    // 4. Company fields are required for employers and dropped otherwise.
    let (company, company_size) =
        validate_company_fields(role, input.company.as_deref(), input.company_size.as_deref())
            .map_err(invalid)?;

    // 5. Duplicate checks. The unique indexes are the real enforcement; these
    //    lookups just produce the friendlier message in the common case.
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists".to_string(),
        )));
    }
    if UserRepo::find_by_contact(&state.pool, contact)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Contact already exists".to_string(),
        )));
    }

    // 6. Hash the password and generate the activation OTP.
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let otp = mailer::generate_otp();

    let create_dto = CreateUser {
        name: name.to_string(),
        contact: contact.to_string(),
        email,
        password_hash,
        role: role.to_string(),
        company,
        company_size,
        location: location.to_string(),
        otp: Some(otp.clone()),
        otp_expiry: Some(mailer::otp_expiry()),
    };

    // 7. Persist. A 23505 race between the checks above and this insert is
    //    classified to the same 400 "already exists" answer.
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    // 8. Welcome email, only when SMTP is configured.
    if let Some(m) = &state.mailer {
        m.send_welcome(&user.email, &user.name, &otp)
            .await
            .map_err(|e| AppError::InternalError(format!("Welcome email delivery failed: {e}")))?;
    }

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /login
///
/// Verify credentials, mint a session token, and set it as an http-only
/// cookie. All failures answer 400 on this path.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    // 1. Both fields must be present and non-empty.
    let (Some(email), Some(password)) = (
        non_empty(&input.email),
        input.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "Please fill all the fields".to_string(),
        )));
    };

    // 2. Look up by normalized email.
    let email = normalize_email(email);
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::BadRequest("User not found".to_string()))?;

    // 3. Verify the password. A comparison error (e.g. a malformed stored
    //    hash) fails closed as a non-match.
    let password_valid = match verify_password(password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Password verification error");
            false
        }
    };
    if !password_valid {
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    // 4. Mint the session token and set the cookie.
    let token = generate_session_token(user.id, &user.name, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = session_cookie(token, &state);
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// GET /logout
///
/// Clears the session cookie unconditionally; there is no server-side
/// session to invalidate.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));

    (
        jar,
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}

/// GET /authcheck
///
/// Re-validate the guard-attached identity against the store, so tokens for
/// users that no longer exist stop working, and return the sanitized profile.
pub async fn authcheck(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<AuthResponse>> {
    let stored = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".to_string())))?;

    Ok(Json(AuthResponse {
        message: "User authenticated".to_string(),
        user: UserResponse::from(&stored),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trimmed, non-empty view of an optional text field.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build the session cookie: http-only, strict same-site, scoped to `/`,
/// expiring together with the token it carries.
fn session_cookie(token: String, state: &AppState) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::hours(state.config.jwt.session_expiry_hours))
        .build()
}
