//! Field validation rules for user registration.
//!
//! Each rule returns `Err` with a human-readable message; callers map these
//! onto their own error types. Email normalization lives here too so every
//! path that touches an email address agrees on the canonical form.

use validator::ValidateEmail;

use crate::roles::{is_valid_role, ROLE_EMPLOYER};

/// Accepted `company_size` buckets for employer accounts.
pub const COMPANY_SIZES: &[&str] = &["1-10", "11-50", "51-200", "201-500", "501"];

/// Default company size assigned to employers that omit the field.
pub const DEFAULT_COMPANY_SIZE: &str = "1-10";

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Canonical form of an email address: trimmed and lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Display name: trimmed, 2..=50 characters.
pub fn validate_name(name: &str) -> Result<(), String> {
    let len = name.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Err("Name must be between 2 and 50 characters".to_string());
    }
    Ok(())
}

/// Contact number: exactly 10 digits.
pub fn validate_contact(contact: &str) -> Result<(), String> {
    if contact.len() != 10 || !contact.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Contact number must be exactly 10 digits".to_string());
    }
    Ok(())
}

/// Email address format check. Expects an already-normalized address.
pub fn validate_email(email: &str) -> Result<(), String> {
    if !email.validate_email() {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

/// Role must be one of the recognized role names.
pub fn validate_role(role: &str) -> Result<(), String> {
    if !is_valid_role(role) {
        return Err(format!("Unknown role: {role}"));
    }
    Ok(())
}

/// Company fields are present if and only if the role is `employer`.
///
/// Returns the normalized `(company, company_size)` pair: employers get a
/// validated company name and a size bucket (defaulting to
/// [`DEFAULT_COMPANY_SIZE`]); any company data sent by other roles is
/// discarded rather than stored.
pub fn validate_company_fields(
    role: &str,
    company: Option<&str>,
    company_size: Option<&str>,
) -> Result<(Option<String>, Option<String>), String> {
    if role != ROLE_EMPLOYER {
        return Ok((None, None));
    }

    let company = company
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| "Company is required for employer accounts".to_string())?;
    let len = company.chars().count();
    if !(2..=50).contains(&len) {
        return Err("Company must be between 2 and 50 characters".to_string());
    }

    let size = company_size
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_COMPANY_SIZE);
    if !COMPANY_SIZES.contains(&size) {
        return Err(format!("Unknown company size: {size}"));
    }

    Ok((Some(company.to_string()), Some(size.to_string())))
}
