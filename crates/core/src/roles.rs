//! User role names.
//!
//! Roles are stored as plain strings in the `users` table; these constants
//! are the only valid values.

/// Platform administrator. May list all users.
pub const ROLE_ADMIN: &str = "admin";

/// Job seeker (the default role).
pub const ROLE_CANDIDATE: &str = "candidate";

/// Company account posting jobs. Requires company fields on registration.
pub const ROLE_EMPLOYER: &str = "employer";

/// All recognized role names.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CANDIDATE, ROLE_EMPLOYER];

/// Whether `role` is one of the recognized role names.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_are_valid() {
        assert!(is_valid_role(ROLE_ADMIN));
        assert!(is_valid_role(ROLE_CANDIDATE));
        assert!(is_valid_role(ROLE_EMPLOYER));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role(""));
        assert!(!is_valid_role("Admin"));
    }
}
