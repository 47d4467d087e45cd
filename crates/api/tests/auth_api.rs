//! HTTP-level integration tests for the authentication flow: registration,
//! login and cookie issuance, authcheck, logout, and the admin-gated user
//! listing.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, get, get_with_cookie, post_json, session_cookie};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Default plaintext password used by test accounts.
const PASSWORD: &str = "test_password_123!";

/// Build a complete, valid registration body for a candidate account.
fn register_body(name: &str, contact: &str, email: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "contact": contact,
        "email": email,
        "password": PASSWORD,
        "confirmPassword": PASSWORD,
        "role": role,
        "location": "Pune",
    })
}

/// Register a user via the API and assert it succeeded.
async fn register_user(app: axum::Router, name: &str, contact: &str, email: &str, role: &str) {
    let response = post_json(app, "/register", register_body(name, contact, email, role)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Log in via the API and return the `token=...` cookie pair.
async fn login_user(app: axum::Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).expect("login must set the session cookie")
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with the sanitized user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/register",
        register_body("Asha Rao", "1234567890", "asha@example.com", "candidate"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["user"]["name"], "Asha Rao");
    assert_eq!(json["user"]["contact"], "1234567890");
    assert_eq!(json["user"]["email"], "asha@example.com");
    assert_eq!(json["user"]["role"], "candidate");
    assert_eq!(json["user"]["location"], "Pune");
    assert_eq!(json["user"]["is_activated"], false);
    // Sanitized: neither the hash nor the OTP may appear.
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("otp").is_none());
}

/// Email addresses are normalized to lowercase before storage.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_normalizes_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/register",
        register_body("Asha Rao", "1234567890", "  Asha@Example.COM ", "candidate"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "asha@example.com");

    // The normalized form collides with differently-cased duplicates.
    let response = post_json(
        app,
        "/register",
        register_body("Asha Again", "0987654321", "ASHA@example.com", "candidate"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A missing required field returns 400 with the fill-all-fields message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = register_body("Asha Rao", "1234567890", "asha@example.com", "candidate");
    body.as_object_mut().unwrap().remove("location");

    let response = post_json(app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please fill all the fields");
}

/// An empty string counts as missing, same as an absent key.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_empty_field_counts_as_missing(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = register_body("Asha Rao", "1234567890", "asha@example.com", "candidate");
    body["name"] = serde_json::json!("   ");

    let response = post_json(app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please fill all the fields");
}

/// Password and confirmation must match.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_password_mismatch(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = register_body("Asha Rao", "1234567890", "asha@example.com", "candidate");
    body["confirmPassword"] = serde_json::json!("something_else_entirely");

    let response = post_json(app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Passwords do not match");
}

/// Registering the same email twice fails the second attempt and never
/// creates two records.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    register_user(app.clone(), "First User", "1234567890", "dup@example.com", "candidate").await;

    let response = post_json(
        app,
        "/register",
        register_body("Second User", "1112223334", "dup@example.com", "candidate"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User already exists");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("dup@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "duplicate registration must not create a row");
}

/// Registering the same contact with a different email also conflicts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_contact(pool: PgPool) {
    let app = common::build_test_app(pool);

    register_user(app.clone(), "First User", "1234567890", "one@example.com", "candidate").await;

    let response = post_json(
        app,
        "/register",
        register_body("Second User", "1234567890", "two@example.com", "candidate"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Contact already exists");
}

/// Employer accounts must supply a company; candidates must not store one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_employer_company_rules(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Employer without a company is rejected.
    let response = post_json(
        app.clone(),
        "/register",
        register_body("Boss Person", "1234567890", "boss@example.com", "employer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Employer with a company succeeds; company_size falls back to the
    // smallest bucket.
    let mut body = register_body("Boss Person", "1234567890", "boss@example.com", "employer");
    body["company"] = serde_json::json!("Acme Corp");
    let response = post_json(app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["company"], "Acme Corp");
    assert_eq!(json["user"]["company_size"], "1-10");
}

/// Too-short passwords are rejected up front.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = register_body("Asha Rao", "1234567890", "asha@example.com", "candidate");
    body["password"] = serde_json::json!("short");
    body["confirmPassword"] = serde_json::json!("short");

    let response = post_json(app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200, the sanitized user, and an http-only
/// session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success_sets_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "Asha Rao", "1234567890", "asha@example.com", "candidate").await;

    let body = serde_json::json!({ "email": "asha@example.com", "password": PASSWORD });
    let response = post_json(app, "/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login must set a cookie")
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let json = body_json(response).await;
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["user"]["email"], "asha@example.com");
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("password_hash").is_none());
}

/// Login with an unknown email returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@example.com", "password": PASSWORD });
    let response = post_json(app, "/login", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User not found");
}

/// Login with the wrong password returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "Asha Rao", "1234567890", "asha@example.com", "candidate").await;

    let body = serde_json::json!({ "email": "asha@example.com", "password": "incorrect_password" });
    let response = post_json(app, "/login", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials");
}

/// Login with missing fields returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "asha@example.com" });
    let response = post_json(app, "/login", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please fill all the fields");
}

// ---------------------------------------------------------------------------
// Authcheck
// ---------------------------------------------------------------------------

/// Authcheck without a cookie returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_authcheck_without_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/authcheck").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Authcheck with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_authcheck_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_with_cookie(app, "/authcheck", "token=not-a-real-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Authcheck with a valid cookie returns the stored profile, sanitized.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_authcheck_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "Asha Rao", "1234567890", "asha@example.com", "candidate").await;
    let cookie = login_user(app.clone(), "asha@example.com", PASSWORD).await;

    let response = get_with_cookie(app, "/authcheck", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User authenticated");
    assert_eq!(json["user"]["name"], "Asha Rao");
    assert_eq!(json["user"]["contact"], "1234567890");
    assert_eq!(json["user"]["email"], "asha@example.com");
    assert_eq!(json["user"]["role"], "candidate");
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("password_hash").is_none());
}

/// A valid cookie for a user that has since been deleted returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_authcheck_deleted_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app.clone(), "Asha Rao", "1234567890", "asha@example.com", "candidate").await;
    let cookie = login_user(app.clone(), "asha@example.com", PASSWORD).await;

    sqlx::query("DELETE FROM users").execute(&pool).await.unwrap();

    let response = get_with_cookie(app, "/authcheck", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logout clears the cookie and answers 200 even when no cookie was sent.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_clears_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/logout").await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("logout must emit a removal cookie")
        .to_string();
    assert!(set_cookie.starts_with("token="));

    let json = body_json(response).await;
    assert_eq!(json["message"], "Logout successful");
}

// ---------------------------------------------------------------------------
// User listing
// ---------------------------------------------------------------------------

/// The listing requires authentication -- no cookie returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_users_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Non-admin roles are forbidden from the listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_users_requires_admin_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "Asha Rao", "1234567890", "asha@example.com", "candidate").await;
    let cookie = login_user(app.clone(), "asha@example.com", PASSWORD).await;

    let response = get_with_cookie(app, "/users", &cookie).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An admin receives the sanitized list of all users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_users_admin_gets_sanitized_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "Site Admin", "1234567890", "admin@example.com", "admin").await;
    register_user(app.clone(), "Asha Rao", "1112223334", "asha@example.com", "candidate").await;
    let cookie = login_user(app.clone(), "admin@example.com", PASSWORD).await;

    let response = get_with_cookie(app, "/users", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().expect("response body should be an array");
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("password_hash").is_none());
        assert!(user.get("otp").is_none());
    }
}

/// An empty store answers 404. The token stays valid because sessions are
/// stateless, so the gate passes even after every row is gone.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_users_empty_store_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app.clone(), "Site Admin", "1234567890", "admin@example.com", "admin").await;
    let cookie = login_user(app.clone(), "admin@example.com", PASSWORD).await;

    sqlx::query("DELETE FROM users").execute(&pool).await.unwrap();

    let response = get_with_cookie(app, "/users", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No users found");
}
