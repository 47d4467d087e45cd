//! Request-pipeline gates: cookie authentication and role checks.

pub mod auth;
pub mod rbac;
